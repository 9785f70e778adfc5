//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gate and the site handler
//! - Wire up middleware (metrics, request ID, tracing, limits, timeout)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GateConfig;
use crate::gate::{locale_gate, ResolvedLocale, SkipRules};
use crate::http::request::{propagate_request_id, request_id, set_request_id};
use crate::http::upstream::{forward, Upstream, UpstreamError};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::security::limits;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the locale gate.
pub struct GateServer {
    router: Router,
}

impl GateServer {
    /// Create a new server with the given configuration.
    pub fn new(config: &GateConfig) -> Result<Self, ServerError> {
        let router = build_router(config)?;
        Ok(Self { router })
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &GateConfig) -> Result<Router, UpstreamError> {
    let rules = Arc::new(SkipRules::from_config(&config.skip));

    let site = match Upstream::from_config(&config.upstream)? {
        Some(upstream) => {
            tracing::info!(upstream = %upstream.authority(), "Forwarding to upstream");
            Router::new().fallback(forward).with_state(Arc::new(upstream))
        }
        None => {
            tracing::info!("No upstream configured, serving local fallback");
            Router::new().fallback(serve_local)
        }
    };

    Ok(site
        .layer(middleware::from_fn_with_state(rules, locale_gate))
        .layer(limits::body_limit(&config.security))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(propagate_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id(request),
            )
        }))
        .layer(set_request_id())
        .layer(middleware::from_fn(metrics::track_metrics)))
}

/// Answers pass-through requests with the served path when there is no
/// upstream.
async fn serve_local(request: Request<Body>) -> String {
    match request.extensions().get::<ResolvedLocale>() {
        Some(ResolvedLocale(locale)) => format!("{locale} {}", request.uri().path()),
        None => request.uri().path().to_string(),
    }
}
