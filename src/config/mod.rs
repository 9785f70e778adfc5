//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → SkipRules built once, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the skip set is fixed at deploy time
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{
    GateConfig, ListenerConfig, ObservabilityConfig, SecurityConfig, SkipConfig,
    TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
