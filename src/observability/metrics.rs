//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_requests_total` (counter): requests by method and status
//! - `gate_request_duration_seconds` (histogram): latency distribution
//! - `gate_upstream_errors_total` (counter): failed upstream forwards

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!(
        "gate_requests_total",
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "gate_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error() {
    metrics::counter!("gate_upstream_errors_total").increment(1);
}

/// Outermost middleware: counts every response, redirects included.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
