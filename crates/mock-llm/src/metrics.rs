//! Prometheus metrics for mock-llm.
//!
//! Tracks dispatched requests per provider and outcome, dispatch latency, and
//! the number of registered mocks.
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_gauge_vec, register_histogram_vec, CounterVec, Encoder,
    GaugeVec, HistogramVec, TextEncoder,
};
use tracing::error;

use crate::mock::MockSet;
use crate::provider::Provider;

lazy_static! {
    /// Requests handled by a provider route
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "mock_llm_requests_total",
        "Total number of requests handled by provider routes",
        // outcome: matched|no_match|empty_conversation|invalid_request|unauthorized
        &["provider", "outcome"]
    )
    .unwrap();

    /// Time spent scanning a registry
    pub static ref DISPATCH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "mock_llm_dispatch_duration_seconds",
        "Time spent matching a request against the registered mocks",
        &["provider"],
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]
    )
    .unwrap();

    /// Registered mocks
    pub static ref MOCKS_REGISTERED: GaugeVec = register_gauge_vec!(
        "mock_llm_mocks_registered",
        "Number of registered mocks",
        &["provider", "state"]  // state: valid|malformed
    )
    .unwrap();
}

/// Collect and return all metrics in Prometheus text format
pub fn collect_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Record one request on a provider route
pub fn record_request(provider: Provider, outcome: &str) {
    REQUESTS_TOTAL
        .with_label_values(&[provider.as_str(), outcome])
        .inc();
}

/// Record how long a dispatch scan took
pub fn record_dispatch_duration(provider: Provider, seconds: f64) {
    DISPATCH_DURATION_SECONDS
        .with_label_values(&[provider.as_str()])
        .observe(seconds);
}

/// Publish registry sizes for every provider
pub fn set_registered_mocks(mocks: &MockSet) {
    for provider in Provider::ALL {
        let malformed = mocks.malformed_count(provider);
        let valid = mocks.count(provider) - malformed;
        MOCKS_REGISTERED
            .with_label_values(&[provider.as_str(), "valid"])
            .set(valid as f64);
        MOCKS_REGISTERED
            .with_label_values(&[provider.as_str(), "malformed"])
            .set(malformed as f64);
    }
}
