//! Supported RPC methods and the params each one admits.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Wire name of the chain height query.
pub const GET_CHAIN_HEIGHT: &str = "ledger_getChainHeight";

/// Which `params` values a method admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsShape {
    /// The handler never reads `params`: any value, or none, is fine.
    Ignored,
    /// Plain JSON-RPC 2.0: absent, an array, or an object.
    Structured,
}

impl ParamsShape {
    pub fn admits(self, params: Option<&Value>) -> bool {
        match (self, params) {
            (Self::Ignored, _) | (Self::Structured, None) => true,
            (Self::Structured, Some(p)) => p.is_array() || p.is_object(),
        }
    }
}

/// Method metadata
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: &'static str,
    pub params: ParamsShape,
}

/// All supported methods, keyed by wire name
pub static METHOD_REGISTRY: LazyLock<HashMap<&'static str, MethodInfo>> = LazyLock::new(|| {
    // The conventional call passes a single empty string; scalars are
    // accepted too.
    let methods = [MethodInfo {
        name: GET_CHAIN_HEIGHT,
        params: ParamsShape::Ignored,
    }];

    methods.into_iter().map(|m| (m.name, m)).collect()
});

/// Get method info by name
pub fn get_method_info(method: &str) -> Option<&'static MethodInfo> {
    METHOD_REGISTRY.get(method)
}

/// Check if method is supported
pub fn is_method_supported(method: &str) -> bool {
    METHOD_REGISTRY.contains_key(method)
}

/// Params rule for `method`; unknown methods get the plain JSON-RPC rule.
pub fn params_shape(method: &str) -> ParamsShape {
    get_method_info(method).map_or(ParamsShape::Structured, |m| m.params)
}
