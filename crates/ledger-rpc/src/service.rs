//! Ledger RPC service - HTTP JSON-RPC server entry point.

use crate::domain::call::{RpcCall, RpcPayload};
use crate::domain::config::RpcConfig;
use crate::domain::error::{codes, ApiError, ServerError};
use crate::middleware::{guard_request, rpc_trace_layer, RequestGuard, RequestTimer, RpcMetrics};
use crate::ports::inbound::{ChainHeightRequest, LedgerApi};
use crate::ports::outbound::ChainHeightSource;
use crate::router::{route_method, AppState};
use crate::rpc::RpcHandlers;
use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tracing::{debug, info};

const MAX_ID_LEN: usize = 256;

/// Ledger RPC service state
pub struct LedgerRpcService {
    config: RpcConfig,
    rpc_handlers: Arc<RpcHandlers>,
    metrics: Arc<RpcMetrics>,
    shutdown: Arc<Notify>,
}

impl LedgerRpcService {
    /// Create a new ledger RPC service.
    ///
    /// The service only keeps a weak reference to `chain`; the caller stays
    /// responsible for keeping the chain alive.
    pub fn new(config: RpcConfig, chain: &Arc<dyn ChainHeightSource>) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            rpc_handlers: Arc::new(RpcHandlers::new(chain)),
            metrics: Arc::new(RpcMetrics::new()),
            shutdown: Arc::new(Notify::new()),
            config,
        })
    }

    /// Bind the configured HTTP address and serve until shutdown.
    pub async fn start(&self) -> Result<(), ServerError> {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{}: {}", addr, e)))?;
        self.serve(listener).await
    }

    /// Serve JSON-RPC on an already bound listener until shutdown.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let addr = listener
            .local_addr()
            .map_err(|e| ServerError::Bind(e.to_string()))?;
        info!(addr = %addr, "Starting ledger RPC server");

        let shutdown = Arc::clone(&self.shutdown);
        axum::serve(listener, self.http_router())
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        info!("Ledger RPC server stopped");
        Ok(())
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<RpcMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build HTTP router for JSON-RPC
    pub fn http_router(&self) -> Router {
        let state = AppState {
            rpc_handlers: Arc::clone(&self.rpc_handlers),
            metrics: Arc::clone(&self.metrics),
        };

        let guard = RequestGuard::new(self.config.limits.clone(), Arc::clone(&self.metrics));
        let middleware = ServiceBuilder::new()
            .layer(rpc_trace_layer())
            .layer(from_fn_with_state(guard, guard_request));

        Router::new()
            .route("/", post(handle_json_rpc))
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_report))
            .layer(middleware)
            .with_state(state)
    }
}

/// Handle JSON-RPC request
async fn handle_json_rpc(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = match RpcPayload::parse(&body) {
        Ok(RpcPayload::Single(call)) => process_single_request(&state, call).await,
        Ok(RpcPayload::Batch(calls)) => {
            let mut responses = Vec::with_capacity(calls.len());
            for call in calls {
                responses.push(process_single_request(&state, call).await);
            }
            Value::Array(responses)
        }
        Err(e) => return (StatusCode::BAD_REQUEST, Json(error_body(None, e))),
    };

    (StatusCode::OK, Json(response))
}

/// Process a single JSON-RPC request
async fn process_single_request(state: &AppState, request: Value) -> Value {
    let call = match RpcCall::from_value(request) {
        Ok(call) => call,
        Err(e) => return error_body(None, e),
    };
    if let Err(e) = validate_request_id(call.id.as_ref()) {
        return error_body(None, e);
    }

    let timer = RequestTimer::new(Arc::clone(&state.metrics));
    let result = route_method(state, &call.method, call.params.as_ref()).await;
    timer.finish(result.is_ok());

    match result {
        Ok(value) => json!({
            "jsonrpc": "2.0",
            "id": call.id,
            "result": value
        }),
        Err(e) => {
            debug!(method = %call.method, code = e.code, "RPC call failed");
            error_body(call.id, e)
        }
    }
}

/// Request ids must be a non-empty string or a number; notifications are
/// not supported.
fn validate_request_id(id: Option<&Value>) -> Result<(), ApiError> {
    match id {
        None => Err(ApiError::new(
            codes::INVALID_REQUEST,
            "Invalid Request: missing or null id (notifications not supported)",
        )),
        Some(Value::String(s)) if s.is_empty() || s.len() > MAX_ID_LEN => Err(ApiError::new(
            codes::INVALID_REQUEST,
            format!("Invalid Request: string id must be 1..={MAX_ID_LEN} bytes"),
        )),
        Some(Value::String(_)) | Some(Value::Number(_)) => Ok(()),
        Some(_) => Err(ApiError::new(
            codes::INVALID_REQUEST,
            "Invalid Request: id must be string or number",
        )),
    }
}

fn error_body(id: Option<Value>, error: ApiError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error
    })
}

/// Health check reporting the chain height when the chain is reachable
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state
        .rpc_handlers
        .ledger
        .get_chain_height(ChainHeightRequest)
    {
        Ok(height) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": crate::VERSION,
                "chain_height": height,
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "version": crate::VERSION,
                "error": e,
            })),
        ),
    }
}

async fn metrics_report(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}
