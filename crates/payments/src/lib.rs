//! Payment service.
//!
//! Authorizes charges against a synthetic ledger whose balances are drawn at
//! random for every request.

pub mod error;
pub mod ledger;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::post;
use common::{LogCounts, RandomSource, ThreadRandom};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use error::PaymentError;
pub use ledger::{CLIENTS, ClientAccount, Ledger, Receipt, mask_name};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8082;

/// Shared state accessible from all handlers.
pub struct AppState {
    pub ledger: Ledger,
}

impl AppState {
    pub fn new(random: Arc<dyn RandomSource>) -> Arc<Self> {
        Arc::new(Self {
            ledger: Ledger::new(random),
        })
    }
}

/// Creates state backed by the thread RNG.
pub fn create_default_state() -> Arc<AppState> {
    AppState::new(Arc::new(ThreadRandom))
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    log_counts: LogCounts,
) -> Router {
    Router::new()
        .route("/pay/{sum}", post(routes::pay::pay))
        .with_state(state)
        .route_layer(middleware::from_fn(common::observability::track_http_metrics))
        .merge(common::observability::router(metrics_handle, log_counts))
        .layer(TraceLayer::new_for_http())
}
