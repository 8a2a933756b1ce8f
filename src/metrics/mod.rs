//! Prometheus metrics for the detection pipeline and catalog lifecycle.
//!
//! Metrics live in a dedicated registry (namespace `runbook_advisor`) and
//! are registered once via [`init_metrics`]. Recording sites use the global
//! statics directly:
//!
//! ```no_run
//! use runbook_advisor::metrics::DETECTION_REQUESTS_TOTAL;
//!
//! DETECTION_REQUESTS_TOTAL.with_label_values(&["database"]).inc();
//! ```

use lazy_static::lazy_static;
use prometheus::{
    core::Collector, CounterVec, Histogram, HistogramOpts, IntGauge, Opts, Registry, TextEncoder,
};

use crate::error::{AppError, Result};

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Total detection requests, labelled by the tier of the top suggestion
    /// ("database", "fallback", "generic", or "none" when nothing matched)
    pub static ref DETECTION_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("detection_requests_total", "Total number of detection requests")
            .namespace("runbook_advisor"),
        &["tier"]
    ).expect("Failed to create DETECTION_REQUESTS_TOTAL metric");

    /// Detection pass duration in seconds
    pub static ref DETECTION_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "detection_duration_seconds",
            "Detection pass duration in seconds"
        )
        .namespace("runbook_advisor")
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
    ).expect("Failed to create DETECTION_DURATION_SECONDS metric");

    /// Number of suggestions returned per detection request
    pub static ref SUGGESTIONS_RETURNED: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "suggestions_returned",
            "Number of suggestions returned per detection request"
        )
        .namespace("runbook_advisor")
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
    ).expect("Failed to create SUGGESTIONS_RETURNED metric");

    /// Catalog refresh attempts, labelled by outcome ("success" / "failure")
    pub static ref CATALOG_REFRESHES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("catalog_refreshes_total", "Total number of catalog refresh attempts")
            .namespace("runbook_advisor"),
        &["outcome"]
    ).expect("Failed to create CATALOG_REFRESHES_TOTAL metric");

    /// Number of records in the current catalog snapshot
    pub static ref CATALOG_SIZE: IntGauge = IntGauge::with_opts(
        Opts::new("catalog_size", "Number of records in the current catalog snapshot")
            .namespace("runbook_advisor"),
    ).expect("Failed to create CATALOG_SIZE metric");
}

/// Register all collectors with the global registry. Call once at startup.
pub fn init_metrics() -> Result<()> {
    let collectors: Vec<Box<dyn Collector>> = vec![
        Box::new(DETECTION_REQUESTS_TOTAL.clone()),
        Box::new(DETECTION_DURATION_SECONDS.clone()),
        Box::new(SUGGESTIONS_RETURNED.clone()),
        Box::new(CATALOG_REFRESHES_TOTAL.clone()),
        Box::new(CATALOG_SIZE.clone()),
    ];

    for collector in collectors {
        PROMETHEUS_REGISTRY
            .register(collector)
            .map_err(|e| AppError::Internal(format!("Failed to register metric: {}", e)))?;
    }

    Ok(())
}

/// Encode the registry in Prometheus text exposition format.
pub fn gather() -> Result<String> {
    let encoder = TextEncoder::new();
    encoder
        .encode_to_string(&PROMETHEUS_REGISTRY.gather())
        .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {}", e)))
}
