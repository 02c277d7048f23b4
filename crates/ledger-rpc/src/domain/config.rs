//! Server configuration.
//!
//! Every field has a default, so a partial document (or none at all) is a
//! complete configuration.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8545;
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1 << 20;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub http: HttpConfig,
    pub limits: LimitsConfig,
}

impl RpcConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()
    }

    /// HTTP bind address
    pub fn http_addr(&self) -> SocketAddr {
        self.http.listen
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub listen: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
        }
    }
}

/// Limits enforced by the request guard before any call is dispatched
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Body size in bytes
    pub max_request_size: usize,
    /// Calls per batch
    pub max_batch_size: usize,
}

impl LimitsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_request_size", self.max_request_size),
            ("max_batch_size", self.max_batch_size),
        ];
        match limits.into_iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(ConfigError::ZeroLimit(name)),
            None => Ok(()),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A zero limit would reject every request
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}
