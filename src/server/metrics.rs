use crate::dataset::Datasets;
use crate::recommend::Strategy;
use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all recommender metrics
const PREFIX: &str = "recommender";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Recommendation Metrics
    pub static ref RECOMMENDATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_recommendations_total"), "Recommendation requests by outcome"),
        &["strategy", "outcome"]
    ).expect("Failed to create recommendations_total metric");

    pub static ref RECOMMENDATION_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_recommendation_duration_seconds"),
            "Time spent scoring and assembling recommendations"
        )
        .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["strategy"]
    ).expect("Failed to create recommendation_duration_seconds metric");

    // Dataset Metrics
    pub static ref DATASET_ITEMS_TOTAL: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_dataset_items_total"), "Size of the loaded datasets"),
        &["strategy", "type"]
    ).expect("Failed to create dataset_items_total metric");

    pub static ref PROCESS_MEMORY_BYTES: Gauge = Gauge::new(
        format!("{PREFIX}_process_memory_bytes"),
        "Process memory usage in bytes"
    ).expect("Failed to create process_memory_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATION_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(DATASET_ITEMS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PROCESS_MEMORY_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Publish the sizes of the loaded datasets
pub fn init_dataset_metrics(datasets: &Datasets) {
    if let Some(content) = &datasets.content {
        let strategy = Strategy::Content.as_str();
        set_dataset_items(strategy, "catalog_rows", content.catalog().len());
        set_dataset_items(strategy, "matrix_rows", content.features().rows());
        set_dataset_items(strategy, "matrix_cols", content.features().cols());
        set_dataset_items(strategy, "stored_values", content.features().nnz());
    }
    if let Some(collaborative) = &datasets.collaborative {
        let strategy = Strategy::Collaborative.as_str();
        let interactions = collaborative.interactions();
        set_dataset_items(strategy, "catalog_rows", collaborative.catalog().len());
        set_dataset_items(strategy, "matrix_rows", interactions.rows());
        set_dataset_items(strategy, "matrix_cols", interactions.users());
        set_dataset_items(strategy, "stored_values", interactions.nnz());
    }
}

fn set_dataset_items(strategy: &str, kind: &str, count: usize) {
    DATASET_ITEMS_TOTAL
        .with_label_values(&[strategy, kind])
        .set(count as f64);
}

/// Maps a request path to a fixed endpoint label.
///
/// Unknown paths all share "other", so the label set can't grow with traffic.
pub fn categorize_endpoint(path: &str) -> &'static str {
    match path.trim_end_matches('/') {
        "" => "home",
        "/v1/recommendations/content" => "recommendations_content",
        "/v1/recommendations/collaborative" => "recommendations_collaborative",
        "/metrics" => "metrics",
        _ => "other",
    }
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let endpoint = categorize_endpoint(path);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, endpoint])
        .observe(duration.as_secs_f64());
}

/// Record a recommendation request; `outcome` is "ok" or an error code
pub fn record_recommendation(strategy: Strategy, outcome: &str, duration: Duration) {
    RECOMMENDATIONS_TOTAL
        .with_label_values(&[strategy.as_str(), outcome])
        .inc();

    RECOMMENDATION_DURATION_SECONDS
        .with_label_values(&[strategy.as_str()])
        .observe(duration.as_secs_f64());
}

/// Update process memory usage
pub fn update_memory_usage() {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            let rss_kb = status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<f64>().ok());
            if let Some(kb) = rss_kb {
                PROCESS_MEMORY_BYTES.set(kb * 1024.0);
            }
        }
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    update_memory_usage();

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
