//! Locale resolver and redirect gate.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, accept-language)
//!     → rules.rs (reserved files, internal prefixes, asset extensions)
//!         match → Skip: pass through untouched
//!     → classify.rs (existing /es or /en prefix?)
//!         yes   → Localized: pass through, add nosniff
//!         no    → negotiate locale → Redirect to /<locale><path>
//!     → middleware.rs turns the Outcome into a response
//! ```
//!
//! # Design Decisions
//! - Skip rules run first and short-circuit everything else
//! - Classification is a total, pure function; the middleware only applies it
//! - Nothing is cached between requests

pub mod classify;
pub mod middleware;
pub mod rules;

pub use classify::{classify, locale_prefix, redirect_target, Outcome};
pub use middleware::{locale_gate, ResolvedLocale};
pub use rules::SkipRules;
