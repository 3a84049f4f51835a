//! Prometheus metrics for codeshot-server.
//!
//! Exposes server metrics in Prometheus format at the `/metrics` endpoint.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder and return a handle for rendering.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();
    let handle = builder.install_recorder()?;

    // Describe metrics for better documentation in /metrics output
    describe_counter!(
        "codeshot_http_requests_total",
        "Total number of HTTP requests processed"
    );
    describe_histogram!(
        "codeshot_http_request_duration_seconds",
        "Duration of HTTP requests in seconds"
    );

    Ok(handle)
}

/// Axum middleware: record a counter and latency histogram per route.
pub async fn track_http(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    // Use the route template ("/api/v1/preset/{id}"), not the raw path, to
    // keep label cardinality bounded.
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let status = response.status().as_u16().to_string();

    counter!(
        "codeshot_http_requests_total",
        "method" => method.clone(), "route" => route.clone(), "status" => status
    )
    .increment(1);
    histogram!(
        "codeshot_http_request_duration_seconds",
        "method" => method, "route" => route
    )
    .record(start.elapsed().as_secs_f64());

    response
}
