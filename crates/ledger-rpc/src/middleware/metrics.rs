//! Request counters exposed on the `/metrics` endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters for dispatched and rejected JSON-RPC calls
#[derive(Debug, Default)]
pub struct RpcMetrics {
    dispatched: AtomicU64,
    failed: AtomicU64,
    // Stopped by the request guard; never reach `dispatched`
    rejected: AtomicU64,
    latency_us: AtomicU64,
}

/// Point-in-time view of [`RpcMetrics`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub success: u64,
    pub error: u64,
    pub rejected: u64,
    pub average_latency_us: f64,
}

impl RpcMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call that reached the router
    pub fn record_request(&self, success: bool, latency_us: u64) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_us.fetch_add(latency_us, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn average_latency_us(&self) -> f64 {
        match self.dispatched.load(Ordering::Relaxed) {
            0 => 0.0,
            n => self.latency_us.load(Ordering::Relaxed) as f64 / n as f64,
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.dispatched.load(Ordering::Relaxed);
        let error = self.failed.load(Ordering::Relaxed).min(total);
        MetricsSnapshot {
            total,
            success: total - error,
            error,
            rejected: self.rejected.load(Ordering::Relaxed),
            average_latency_us: self.average_latency_us(),
        }
    }

    /// Body of `GET /metrics`
    pub fn to_json(&self) -> serde_json::Value {
        let s = self.snapshot();
        serde_json::json!({
            "requests": {
                "total": s.total,
                "success": s.success,
                "error": s.error,
                "rejected": s.rejected,
            },
            "latency": {
                "average_us": s.average_latency_us,
            }
        })
    }
}

/// Measures one dispatched call; consumed by [`RequestTimer::finish`].
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<RpcMetrics>,
}

impl RequestTimer {
    pub fn new(metrics: Arc<RpcMetrics>) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_us = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.metrics.record_request(success, latency_us);
    }
}
