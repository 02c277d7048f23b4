//! RPC method handlers for JSON-RPC API.

pub mod ledger;

pub use ledger::LedgerRpc;

use crate::ports::outbound::ChainHeightSource;
use std::sync::Arc;

/// All RPC handlers
#[derive(Debug, Clone)]
pub struct RpcHandlers {
    pub ledger: LedgerRpc,
}

impl RpcHandlers {
    /// Create all RPC handlers from the node's chain state
    pub fn new(chain: &Arc<dyn ChainHeightSource>) -> Self {
        Self {
            ledger: LedgerRpc::from_shared(chain),
        }
    }
}
