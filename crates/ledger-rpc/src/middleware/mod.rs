//! Middleware stack for the ledger RPC server.
//!
//! Layer order: Request → Tracing → Request guard → Handler

pub mod metrics;
pub mod tracing;
pub mod validation;

pub use self::metrics::{MetricsSnapshot, RequestTimer, RpcMetrics};
pub use self::tracing::{rpc_trace_layer, RpcTraceLayer};
pub use self::validation::{guard_request, validate_jsonrpc, RequestGuard};
