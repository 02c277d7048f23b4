//! Domain types for the ledger RPC.
//!
//! This module contains configuration, call envelopes, error handling and
//! the method registry.

pub mod call;
pub mod config;
pub mod error;
pub mod methods;

// Re-exports for convenience
pub use call::{RpcCall, RpcPayload};
pub use config::{ConfigError, HttpConfig, LimitsConfig, RpcConfig};
pub use error::{ApiError, ApiResult, LedgerError, ServerError};
pub use methods::{get_method_info, is_method_supported, MethodInfo, ParamsShape};
