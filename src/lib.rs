//! Locale gate for a bilingual marketing site.
//!
//! Every request is classified as a non-page resource (passed through
//! untouched), an already-localized page (passed through with hardening
//! headers), or a bare page (redirected to `/<locale><path>` using the
//! client's Accept-Language preference, defaulting to Spanish).

// Core
pub mod gate;
pub mod locale;

// Service shell
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GateConfig;
pub use gate::{classify, Outcome, SkipRules};
pub use http::GateServer;
pub use lifecycle::Shutdown;
pub use locale::Locale;
