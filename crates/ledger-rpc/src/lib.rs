//! Ledger RPC - read-only JSON-RPC access to blockchain node state.
//!
//! Exposes the current chain height of the node over JSON-RPC 2.0. The crate
//! owns no chain state: handlers hold a weak reference to the node's
//! blockchain component and read from it on demand.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    LEDGER RPC                         │
//! ├──────────────────────────────────────────────────────┤
//! │   HTTP POST /  ──►  Tracing → Request guard           │
//! │                          │                            │
//! │                     route_method                      │
//! │                          │                            │
//! │                     LedgerRpc ─ ─ (Weak) ─ ─┐         │
//! └─────────────────────────────────────────────┼────────┘
//!                                               ▼
//!                                     ChainHeightSource
//!                                   (node's blockchain)
//! ```
//!
//! # Methods
//!
//! - `ledger_getChainHeight`: params ignored, result is the height as a
//!   JSON number.
//!
//! # Usage
//!
//! ```ignore
//! use ledger_rpc::{ChainHeightSource, InMemoryChain, LedgerRpcService, RpcConfig};
//!
//! let chain: Arc<dyn ChainHeightSource> = Arc::new(InMemoryChain::new());
//! let service = LedgerRpcService::new(RpcConfig::default(), &chain)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod rpc;
pub mod service;

// Re-exports for public API
pub use adapters::InMemoryChain;
pub use domain::config::RpcConfig;
pub use domain::error::{ApiError, ApiResult, LedgerError, ServerError};
pub use domain::methods::{get_method_info, is_method_supported, MethodInfo, ParamsShape};
pub use middleware::RpcMetrics;
pub use ports::{ChainHeightRequest, ChainHeightSource, LedgerApi};
pub use rpc::LedgerRpc;
pub use service::LedgerRpcService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
