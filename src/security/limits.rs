//! Request limits.
//!
//! Oversized bodies are rejected with 413 Payload Too Large before they reach
//! the upstream.

use tower_http::limit::RequestBodyLimitLayer;

use crate::config::SecurityConfig;

pub fn body_limit(config: &SecurityConfig) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(config.max_body_size)
}
