//! # Inbound Ports (Driving Ports)
//!
//! The query API exposed to the RPC transport.

use crate::domain::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Request for the chain height. Carries no arguments.
///
/// Deserializes from any JSON value so callers may send `[]`, `[""]`, `null`
/// or nothing at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChainHeightRequest;

impl<'de> Deserialize<'de> for ChainHeightRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(ChainHeightRequest)
    }
}

/// Read-only ledger queries.
pub trait LedgerApi: Send + Sync {
    /// Current chain height.
    ///
    /// ## Errors
    ///
    /// - `-32002` resource unavailable: the chain state provider is gone.
    fn get_chain_height(&self, request: ChainHeightRequest) -> ApiResult<u32>;
}
