//! Adapters for the ledger RPC.
//!
//! Infrastructure implementations of the outbound ports.

pub mod memory_chain;

pub use memory_chain::InMemoryChain;
