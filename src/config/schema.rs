//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::gate::rules::{DEFAULT_SKIP_EXTENSIONS, DEFAULT_SKIP_PATHS, DEFAULT_SKIP_PREFIXES};

/// Root configuration for the locale gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Origin that receives pass-through requests.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Paths that are never locale-rewritten.
    pub skip: SkipConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the site origin (e.g., "http://127.0.0.1:3000").
    /// When unset, pass-through requests hit the built-in fallback handler.
    pub address: Option<String>,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: None,
            connect_timeout_secs: 5,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Skip rule configuration. Each list replaces its default when present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SkipConfig {
    /// Exact paths (e.g., "/robots.txt").
    pub paths: Vec<String>,

    /// Path prefixes (e.g., "/api/").
    pub prefixes: Vec<String>,

    /// File extensions without the dot (e.g., "png").
    pub extensions: Vec<String>,
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            paths: DEFAULT_SKIP_PATHS.iter().map(|s| s.to_string()).collect(),
            prefixes: DEFAULT_SKIP_PREFIXES.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_SKIP_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
