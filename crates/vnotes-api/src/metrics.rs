//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vnotes_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vnotes_http_request_duration_seconds";

    // Notes pipeline metrics
    pub const NOTE_REQUESTS_TOTAL: &str = "vnotes_note_requests_total";
    pub const NOTE_FAILURES_TOTAL: &str = "vnotes_note_failures_total";
    pub const NOTE_GENERATION_DURATION_SECONDS: &str = "vnotes_note_generation_duration_seconds";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record an accepted note request.
pub fn record_note_request() {
    counter!(names::NOTE_REQUESTS_TOTAL).increment(1);
}

/// Record a completed generation.
pub fn record_note_generated(duration_secs: f64) {
    histogram!(names::NOTE_GENERATION_DURATION_SECONDS).record(duration_secs);
}

/// Record a failed note request by taxonomy category.
pub fn record_note_failure(category: &'static str) {
    let labels = [("category", category)];
    counter!(names::NOTE_FAILURES_TOTAL, &labels).increment(1);
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
