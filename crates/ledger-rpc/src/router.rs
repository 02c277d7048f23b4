use crate::domain::error::{ApiError, ApiResult};
use crate::domain::methods::GET_CHAIN_HEIGHT;
use crate::middleware::RpcMetrics;
use crate::ports::inbound::{ChainHeightRequest, LedgerApi};
use crate::rpc::RpcHandlers;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub rpc_handlers: Arc<RpcHandlers>,
    pub metrics: Arc<RpcMetrics>,
}

/// Dispatch one call by method name.
pub async fn route_method(
    state: &AppState,
    method: &str,
    params: Option<&Value>,
) -> ApiResult<Value> {
    match method {
        GET_CHAIN_HEIGHT => {
            let request: ChainHeightRequest = leading_param(params).unwrap_or_default();
            let height = state.rpc_handlers.ledger.get_chain_height(request)?;
            Ok(Value::from(height))
        }
        _ => Err(ApiError::method_not_found(method)),
    }
}

/// First positional param, or the whole `params` value when it is not an
/// array.
fn leading_param<T: DeserializeOwned>(params: Option<&Value>) -> Option<T> {
    let value = match params? {
        Value::Array(items) => items.first()?,
        other => other,
    };
    T::deserialize(value).ok()
}
