//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method and status
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency by method
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so tests need no setup
//! - Transport failures are counted under status 500 like the caller sees them

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one proxied request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("proxy_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}
