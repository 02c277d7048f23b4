//! End-to-end tests: a real HTTP client against a served `LedgerRpcService`.

pub mod end_to_end;
