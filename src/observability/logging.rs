//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to this
//! crate and `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(log_level: &str) -> String {
    format!("locale_gate={log_level},tower_http={log_level}")
}

/// Install the global tracing subscriber.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
