//! Configuration structures
//!
//! Pure data; loading and validation live in the client crate.

use serde::{Deserialize, Serialize};

/// Top-level configuration for an OpenProject client session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Where and how to reach the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base endpoint of the OpenProject instance, e.g. `https://op.example.com`.
    pub base_url: String,
    /// Static API token, Basic-encoded once at session creation.
    pub api_key: String,
    /// Outbound Host header override for deployments where the public
    /// endpoint differs from the internal routing target.
    #[serde(default)]
    pub host_header: Option<String>,
}

/// Retry tuning consumed by the request executor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts (initial try + retries).
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}
