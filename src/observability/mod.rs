//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server layers produce:
//!     → logging.rs (structured log events, per-request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The gate itself stays silent; logging happens in the server layers
//! - Request ID flows into every span
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
