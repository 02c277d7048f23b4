//! JSON-RPC 2.0 call envelopes.

use crate::domain::error::ApiError;
use crate::domain::methods::params_shape;
use serde::Deserialize;
use serde_json::Value;

const MAX_METHOD_LEN: usize = 256;

/// A request body: one call or a batch of raw entries.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcPayload {
    Single(Value),
    Batch(Vec<Value>),
}

impl RpcPayload {
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        match serde_json::from_slice::<Value>(body).map_err(ApiError::parse_error)? {
            Value::Array(entries) => Ok(Self::Batch(entries)),
            call @ Value::Object(_) => Ok(Self::Single(call)),
            _ => Err(ApiError::invalid_request("body must be an object or array")),
        }
    }
}

/// A single call. `null` and a missing `id` both read as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcCall {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl RpcCall {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        serde_json::from_value(value).map_err(ApiError::invalid_request)
    }

    /// Structural checks that do not depend on chain state.
    pub fn check(&self) -> Result<(), ApiError> {
        if self.jsonrpc != "2.0" {
            return Err(ApiError::invalid_request("jsonrpc must be \"2.0\""));
        }
        if self.method.is_empty() || self.method.len() > MAX_METHOD_LEN {
            return Err(ApiError::invalid_request(format!(
                "method name must be 1..={MAX_METHOD_LEN} bytes"
            )));
        }
        if let Some(id) = &self.id {
            if !(id.is_string() || id.is_number()) {
                return Err(ApiError::invalid_request("id must be string, number, or null"));
            }
        }
        if !params_shape(&self.method).admits(self.params.as_ref()) {
            return Err(ApiError::invalid_request(format!(
                "params of {} must be array or object",
                self.method
            )));
        }
        Ok(())
    }
}
