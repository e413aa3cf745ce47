//! Inventory service.
//!
//! Owns the fixed product catalog and answers reservation requests with a
//! one-in-ten simulated stock-out.

pub mod error;
pub mod routes;
pub mod stock;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use common::{LogCounts, RandomSource, ThreadRandom};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use error::InventoryError;
pub use stock::{CATALOG, Inventory, OUT_OF_STOCK_ODDS, Reservation};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8081;

/// Shared state accessible from all handlers.
pub struct AppState {
    pub inventory: Inventory,
}

impl AppState {
    pub fn new(random: Arc<dyn RandomSource>) -> Arc<Self> {
        Arc::new(Self {
            inventory: Inventory::new(random),
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
        .route("/products", get(routes::products::list))
        .route("/products/reserve/", post(routes::products::reserve_unnamed))
        .route("/products/reserve/{product}", post(routes::products::reserve))
        .with_state(state)
        .route_layer(middleware::from_fn(common::observability::track_http_metrics))
        .merge(common::observability::router(metrics_handle, log_counts))
        .layer(TraceLayer::new_for_http())
}
