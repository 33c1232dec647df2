//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (requests, rejections, latency, tracked clients)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `gate_requests_total` (counter): requests by method and status
//! - `gate_requests_rejected_total` (counter): 429s from the limiter
//! - `gate_request_duration_seconds` (histogram): latency distribution
//! - `gate_tracked_clients` (gauge): client buckets held by the limiter
//!
//! # Design Decisions
//! - Metric updates are cheap atomic operations on the hot path
//! - The exporter runs on its own address, outside the limited pipeline

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Failure to install is logged and otherwise ignored; the gateway serves
/// traffic without metrics rather than refusing to start.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    if let Err(e) = builder.install() {
        tracing::error!(error = %e, "Failed to install metrics exporter");
        return;
    }

    describe_counter!("gate_requests_total", "Total requests by method and status");
    describe_counter!(
        "gate_requests_rejected_total",
        "Requests rejected by the rate limiter"
    );
    describe_histogram!(
        "gate_request_duration_seconds",
        "Request latency in seconds"
    );
    describe_gauge!(
        "gate_tracked_clients",
        "Client buckets currently tracked by the limiter"
    );

    tracing::info!(address = %addr, "Metrics exporter listening");
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "gate_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gate_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one rate-limited rejection.
pub fn record_rate_limited() {
    counter!("gate_requests_rejected_total").increment(1);
}

/// Record the current number of tracked client buckets.
pub fn record_tracked_clients(count: usize) {
    gauge!("gate_tracked_clients").set(count as f64);
}
