//! Metrics collection and exposition.
//!
//! # Metrics
//! - `county_lookup_requests_total` (counter): requests by outcome, status
//! - `county_lookup_duration_seconds` (histogram): latency by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished `/county_data` request.
pub fn record_request(outcome: &'static str, status: u16, start_time: Instant) {
    ::metrics::counter!(
        "county_lookup_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("county_lookup_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
