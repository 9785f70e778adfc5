//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GateConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load the config file if given (defaults otherwise), apply a bind address
/// override, and validate the result.
pub fn resolve_config(path: Option<&Path>, bind: Option<&str>) -> Result<GateConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };
    if let Some(bind) = bind {
        config.listener.bind_address = bind.to_string();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GateConfig, ConfigError> {
    let config: GateConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
