//! Per-request tracing spans.
//!
//! Built on `tower_http::trace`: every HTTP request runs inside an
//! `rpc_request` span that ends up carrying the status code and latency.

use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, MakeSpan, OnResponse, TraceLayer};
use tracing::{debug, field::Empty, info_span, Span};

/// Trace layer type installed on the HTTP router
pub type RpcTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RpcSpan, DefaultOnRequest, RecordOutcome>;

pub fn rpc_trace_layer() -> RpcTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RpcSpan)
        .on_response(RecordOutcome)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RpcSpan;

impl<B> MakeSpan<B> for RpcSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "rpc_request",
            http.method = %request.method(),
            http.target = %request.uri().path(),
            http.status_code = Empty,
            latency_us = Empty,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordOutcome;

impl<B> OnResponse<B> for RecordOutcome {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();
        let latency_us = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        span.record("http.status_code", status);
        span.record("latency_us", latency_us);
        debug!(parent: span, status, latency_us, "Request finished");
    }
}
