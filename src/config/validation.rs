//! Configuration validation.
//!
//! Returns every problem found, not just the first, and runs before the
//! config is accepted into the system.

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GateConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.address: {0}")]
    InvalidUpstream(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("skip.{field}: {value:?} must start with '/'")]
    RelativeSkipPath { field: &'static str, value: String },

    #[error("skip.extensions: {0:?} is not a bare extension")]
    InvalidExtension(String),
}

pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if let Some(address) = &config.upstream.address {
        if let Err(e) = check_upstream(address) {
            errors.push(e);
        }
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    for (field, values) in [("paths", &config.skip.paths), ("prefixes", &config.skip.prefixes)] {
        for value in values.iter().filter(|v| !v.starts_with('/')) {
            errors.push(ValidationError::RelativeSkipPath {
                field,
                value: value.clone(),
            });
        }
    }

    for ext in &config.skip.extensions {
        let bare = ext.trim_start_matches('.');
        if bare.is_empty() || bare.contains(['.', '/']) {
            errors.push(ValidationError::InvalidExtension(ext.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// The forwarding client speaks plain HTTP only.
fn check_upstream(address: &str) -> Result<(), ValidationError> {
    let url = Url::parse(address).map_err(|e| ValidationError::InvalidUpstream(e.to_string()))?;
    if url.scheme() != "http" {
        return Err(ValidationError::InvalidUpstream(format!(
            "unsupported scheme {:?}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(ValidationError::InvalidUpstream("missing host".to_string()));
    }
    Ok(())
}
