//! # Ledger RPC Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Server over a real TCP socket
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ledger-tests
//! cargo test -p ledger-tests integration::
//! ```

pub mod integration;
