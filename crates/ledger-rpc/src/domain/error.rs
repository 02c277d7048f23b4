//! Error types for the ledger RPC.
//!
//! [`ApiError`] is what goes over the wire in the JSON-RPC `error` member.
//! [`LedgerError`] is what the adapter itself can fail with, and
//! [`ServerError`] covers the HTTP server lifecycle.

use serde::Serialize;
use std::fmt;

/// JSON-RPC 2.0 error codes emitted by this server
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;

    // Implementation-defined server errors
    pub const RESOURCE_UNAVAILABLE: i32 = -32002;
    pub const LIMIT_EXCEEDED: i32 = -32005;
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
}

impl ApiError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Body is not valid JSON
    pub fn parse_error(details: impl fmt::Display) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {details}"))
    }

    /// Body is JSON but not a JSON-RPC 2.0 call
    pub fn invalid_request(details: impl fmt::Display) -> Self {
        Self::new(codes::INVALID_REQUEST, format!("Invalid request: {details}"))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(codes::METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Request size or batch length over the configured limit
    pub fn limit_exceeded(details: impl fmt::Display) -> Self {
        Self::new(codes::LIMIT_EXCEEDED, format!("Limit exceeded: {details}"))
    }

    /// Prefix the message with the position of the offending batch entry.
    pub fn in_batch_item(self, index: usize) -> Self {
        Self {
            message: format!("batch item {index}: {}", self.message),
            ..self
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for RPC operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised by the ledger query adapter itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The chain state provider has been dropped (or was never alive).
    #[error("chain state provider unavailable")]
    ProviderUnavailable,
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::ProviderUnavailable => Self::new(
                codes::RESOURCE_UNAVAILABLE,
                format!("Resource unavailable: {e}"),
            ),
        }
    }
}

/// Server-level errors (not JSON-RPC, internal use)
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("server bind error: {0}")]
    Bind(String),

    #[error("server error: {0}")]
    Serve(String),
}
