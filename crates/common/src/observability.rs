//! Health, metrics and diagnostic endpoints shared by every service.

use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::{MatchedPath, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::telemetry::{LogCounts, LogCountsSnapshot};

#[derive(Clone)]
struct ObservabilityState {
    metrics: PrometheusHandle,
    log_counts: LogCounts,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Builds the `/health`, `/metrics` and `/diagnostics/log-counts` routes.
pub fn router(metrics: PrometheusHandle, log_counts: LogCounts) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .route("/diagnostics/log-counts", get(log_counts_snapshot))
        .with_state(ObservabilityState {
            metrics,
            log_counts,
        })
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /metrics in Prometheus text exposition format.
async fn render_metrics(State(state): State<ObservabilityState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.metrics.render(),
    )
}

/// GET /diagnostics/log-counts
async fn log_counts_snapshot(State(state): State<ObservabilityState>) -> Json<LogCountsSnapshot> {
    Json(state.log_counts.snapshot())
}

/// Records `http_requests_total` and `http_requests_duration_seconds` per matched route.
///
/// Install with `Router::route_layer` so the matched path is available.
pub async fn track_http_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };
    let method = req.method().to_string();

    let response = next.run(req).await;

    let labels = [
        ("method", method),
        ("path", path),
        ("status", response.status().as_u16().to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_requests_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());

    response
}
