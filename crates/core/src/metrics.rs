//! Metrics definitions for node and connection resolution.
//!
//! Metrics are collected using the `metrics` crate and can be exported
//! to Prometheus via `metrics-exporter-prometheus`.

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "node_resolutions_total",
        "Total number of global id resolutions, by node type and outcome"
    );
    describe_counter!(
        "connection_builds_total",
        "Total number of connections built, by outcome"
    );
    describe_histogram!(
        "connection_edges",
        "Number of edges returned per connection"
    );
}

/// Record the outcome of a node resolution.
///
/// # Arguments
/// * `node_type` - The decoded type name, or `"unknown"` if decoding failed
/// * `outcome` - One of `"found"`, `"missing"` or an error code
pub fn record_node_resolution(node_type: &str, outcome: &str) {
    counter!(
        "node_resolutions_total",
        "type" => node_type.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record a built connection and its size.
pub fn record_connection_built(edges: usize) {
    counter!("connection_builds_total", "outcome" => "ok").increment(1);
    histogram!("connection_edges").record(edges as f64);
}

/// Record a connection request that failed.
///
/// # Arguments
/// * `code` - The error code (see [`crate::error::RelayError::code`])
pub fn record_connection_error(code: &str) {
    counter!("connection_builds_total", "outcome" => code.to_string()).increment(1);
}
