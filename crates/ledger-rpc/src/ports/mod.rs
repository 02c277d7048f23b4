//! # Ports
//!
//! - `inbound`: the query API the RPC layer drives.
//! - `outbound`: the chain state this crate reads from.

pub mod inbound;
pub mod outbound;

pub use inbound::{ChainHeightRequest, LedgerApi};
pub use outbound::ChainHeightSource;
