//! Request guard for `POST /`.
//!
//! Rejects bodies over the size limit, oversized or empty batches and calls
//! that are not JSON-RPC 2.0 before they reach the router. Rejections are
//! answered with HTTP 400 (413 for limits) and counted in [`RpcMetrics`].

use crate::domain::call::{RpcCall, RpcPayload};
use crate::domain::config::LimitsConfig;
use crate::domain::error::{codes, ApiError};
use crate::middleware::metrics::RpcMetrics;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::warn;

/// State for [`guard_request`].
#[derive(Debug, Clone)]
pub struct RequestGuard {
    limits: Arc<LimitsConfig>,
    metrics: Arc<RpcMetrics>,
}

impl RequestGuard {
    pub fn new(limits: LimitsConfig, metrics: Arc<RpcMetrics>) -> Self {
        Self {
            limits: Arc::new(limits),
            metrics,
        }
    }

    fn reject(&self, error: ApiError) -> Response {
        warn!(code = error.code, error = %error.message, "Rejected JSON-RPC request");
        self.metrics.record_rejection();
        error_response(error)
    }
}

/// Middleware entry point, installed with `axum::middleware::from_fn_with_state`.
pub async fn guard_request(
    State(guard): State<RequestGuard>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let max = guard.limits.max_request_size;
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if let Some(len) = declared.filter(|len| *len > max) {
        return guard.reject(ApiError::limit_exceeded(format!(
            "request size {len} exceeds limit {max}"
        )));
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, max).await {
        Ok(bytes) => bytes,
        Err(e) => return guard.reject(ApiError::limit_exceeded(e)),
    };

    if let Err(e) = validate_jsonrpc(&bytes, &guard.limits) {
        return guard.reject(e);
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Check a request body against the limits and the JSON-RPC call rules.
pub fn validate_jsonrpc(body: &[u8], limits: &LimitsConfig) -> Result<(), ApiError> {
    match RpcPayload::parse(body)? {
        RpcPayload::Single(call) => RpcCall::from_value(call)?.check(),
        RpcPayload::Batch(entries) if entries.is_empty() => {
            Err(ApiError::invalid_request("empty batch"))
        }
        RpcPayload::Batch(entries) if entries.len() > limits.max_batch_size => {
            Err(ApiError::limit_exceeded(format!(
                "batch of {} exceeds limit {}",
                entries.len(),
                limits.max_batch_size
            )))
        }
        RpcPayload::Batch(entries) => entries
            .into_iter()
            .enumerate()
            .try_for_each(|(index, entry)| {
                RpcCall::from_value(entry)
                    .and_then(|call| call.check())
                    .map_err(|e| e.in_batch_item(index))
            }),
    }
}

fn error_response(error: ApiError) -> Response {
    let status = match error.code {
        codes::LIMIT_EXCEEDED => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": error,
    });
    (status, Json(body)).into_response()
}
