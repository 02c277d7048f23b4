//! # Outbound Ports (Driven Ports)
//!
//! Chain state consumed by the ledger RPC. Implemented by the node's
//! blockchain component; this crate never writes through it.

/// Read access to the committed chain height.
///
/// `Sync` is required because RPC handlers read the height from many
/// connections at once. Implementations own whatever synchronization the
/// height needs and must never hand out a torn or decreasing value.
pub trait ChainHeightSource: Send + Sync {
    /// Number of blocks committed to the canonical chain.
    fn current_height(&self) -> u32;
}
