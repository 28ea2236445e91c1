//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, asset visits)
//! - Expose a Prometheus-compatible scrape endpoint
//!
//! # Metrics
//! - `chirpy_http_requests_total` (counter): requests by method, status
//! - `chirpy_http_request_duration_seconds` (histogram): latency distribution
//! - `chirpy_app_visits_total` (counter): static asset hits
//!
//! # Design Decisions
//! - Separate from the admin visit counter, which resets; these never do
//! - Without an installed recorder every call is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and start its HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("chirpy_http_requests_total", &labels).increment(1);
    metrics::histogram!("chirpy_http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_visit() {
    metrics::counter!("chirpy_app_visits_total").increment(1);
}
