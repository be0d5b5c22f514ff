//! Prometheus metrics for the string analyzer
//!
//! All metrics live in [`PROMETHEUS_REGISTRY`] under the `string_analyzer`
//! namespace. Call [`init_metrics`] once at startup and expose
//! [`gather_metrics`] over HTTP.
//!
//! # Example
//! ```no_run
//! use string_analyzer::metrics::HTTP_REQUESTS_TOTAL;
//!
//! HTTP_REQUESTS_TOTAL
//!     .with_label_values(&["GET", "/health", "200"])
//!     .inc();
//! ```

mod middleware;

pub use middleware::track_http_metrics;

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};

const NAMESPACE: &str = "string_analyzer";

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    // ============================================================================
    // HTTP Metrics
    // ============================================================================

    /// Total number of HTTP requests received
    ///
    /// Labels: method, path, status_code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace(NAMESPACE),
        &["method", "path", "status_code"]
    ).expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// HTTP request duration in seconds
    ///
    /// Labels: method, path
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["method", "path"]
    ).expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    // ============================================================================
    // Analysis Metrics
    // ============================================================================

    /// Strings analyzed and stored
    pub static ref STRINGS_ANALYZED_TOTAL: IntCounter = IntCounter::with_opts(
        Opts::new("strings_analyzed_total", "Total number of strings analyzed and stored")
            .namespace(NAMESPACE)
    ).expect("Failed to create STRINGS_ANALYZED_TOTAL metric");

    /// Strings deleted
    pub static ref STRINGS_DELETED_TOTAL: IntCounter = IntCounter::with_opts(
        Opts::new("strings_deleted_total", "Total number of strings deleted")
            .namespace(NAMESPACE)
    ).expect("Failed to create STRINGS_DELETED_TOTAL metric");

    /// Records currently held by the store
    pub static ref STRINGS_STORED: IntGauge = IntGauge::with_opts(
        Opts::new("strings_stored", "Number of records currently stored")
            .namespace(NAMESPACE)
    ).expect("Failed to create STRINGS_STORED metric");

    /// Filter queries served
    ///
    /// Labels: kind (structured, natural_language)
    pub static ref FILTER_QUERIES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("filter_queries_total", "Total number of filter queries served")
            .namespace(NAMESPACE),
        &["kind"]
    ).expect("Failed to create FILTER_QUERIES_TOTAL metric");

    // ============================================================================
    // Error Metrics
    // ============================================================================

    /// Error responses by error code
    ///
    /// Labels: code
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("errors_total", "Total number of error responses")
            .namespace(NAMESPACE),
        &["code"]
    ).expect("Failed to create ERRORS_TOTAL metric");
}

/// Register all metrics with the global registry
///
/// Fails with `AlreadyReg` when called twice.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(STRINGS_ANALYZED_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(STRINGS_DELETED_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(STRINGS_STORED.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(FILTER_QUERIES_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(ERRORS_TOTAL.clone()))?;

    tracing::debug!("Prometheus metrics registered");
    Ok(())
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}
