//! Ledger JSON-RPC methods (ledger_*).

use crate::domain::error::{ApiResult, LedgerError};
use crate::ports::inbound::{ChainHeightRequest, LedgerApi};
use crate::ports::outbound::ChainHeightSource;
use std::sync::{Arc, Weak};
use tracing::{debug, instrument, warn};

/// Ledger RPC methods handler.
///
/// Holds a weak reference to the chain: the node owns the blockchain
/// component, this handler only reads from it while it is alive.
#[derive(Clone)]
pub struct LedgerRpc {
    chain: Weak<dyn ChainHeightSource>,
}

impl LedgerRpc {
    pub fn new<C: ChainHeightSource + 'static>(chain: &Arc<C>) -> Self {
        let chain = Arc::downgrade(chain);
        Self { chain }
    }

    /// Build from an already type-erased provider.
    pub fn from_shared(chain: &Arc<dyn ChainHeightSource>) -> Self {
        Self {
            chain: Arc::downgrade(chain),
        }
    }

    /// Build from a weak reference, rejecting a provider that is already gone.
    pub fn try_from_weak(chain: Weak<dyn ChainHeightSource>) -> Result<Self, LedgerError> {
        if chain.strong_count() == 0 {
            return Err(LedgerError::ProviderUnavailable);
        }
        Ok(Self { chain })
    }

    /// Whether the chain state provider is still alive.
    pub fn is_available(&self) -> bool {
        self.chain.strong_count() > 0
    }

    fn provider(&self) -> Result<Arc<dyn ChainHeightSource>, LedgerError> {
        self.chain.upgrade().ok_or(LedgerError::ProviderUnavailable)
    }
}

impl LedgerApi for LedgerRpc {
    /// ledger_getChainHeight - Returns the number of committed blocks
    #[instrument(skip(self, _request))]
    fn get_chain_height(&self, _request: ChainHeightRequest) -> ApiResult<u32> {
        let chain = self.provider().inspect_err(|_| {
            warn!("Chain height requested but chain state provider is gone");
        })?;

        let height = chain.current_height();
        debug!(height, "Chain height served");
        Ok(height)
    }
}

impl std::fmt::Debug for LedgerRpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerRpc")
            .field("available", &self.is_available())
            .finish()
    }
}
