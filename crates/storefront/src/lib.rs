//! Storefront service.
//!
//! Exposes the catalog and a purchase endpoint. Each purchase reserves the
//! product with the inventory service and then charges the payment service,
//! reporting the first failure back to the caller.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod purchase;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use common::{LogCounts, RandomSource, ThreadRandom};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{DEFAULT_PORT, ServiceLocator, StorefrontConfig};
pub use error::DownstreamError;
pub use orchestrator::Storefront;
pub use purchase::{MAX_PRICE_UNITS, MIN_PRICE_UNITS, PurchaseResult, PurchaseStatus};
pub use services::{
    HttpInventoryClient, HttpPaymentClient, InMemoryInventoryClient, InMemoryPaymentClient,
    InventoryClient, PaymentClient,
};

/// Shared application state accessible from all handlers.
pub struct AppState<I, P>
where
    I: InventoryClient,
    P: PaymentClient,
{
    pub storefront: Storefront<I, P>,
}

impl<I, P> AppState<I, P>
where
    I: InventoryClient,
    P: PaymentClient,
{
    pub fn new(inventory: I, payments: P, random: Arc<dyn RandomSource>) -> Arc<Self> {
        Arc::new(Self {
            storefront: Storefront::new(inventory, payments, random),
        })
    }
}

/// Creates state that reaches the downstream services over HTTP.
pub fn create_default_state(
    services: &ServiceLocator,
) -> Arc<AppState<HttpInventoryClient, HttpPaymentClient>> {
    let client = reqwest::Client::new();
    AppState::new(
        HttpInventoryClient::new(client.clone(), services.inventory.clone()),
        HttpPaymentClient::new(client, services.payments.clone()),
        Arc::new(ThreadRandom),
    )
}

/// Creates the Axum application router with all routes and shared state.
///
/// The storefront is the browser-facing edge, so it answers CORS preflights.
pub fn create_app<I, P>(
    state: Arc<AppState<I, P>>,
    metrics_handle: PrometheusHandle,
    log_counts: LogCounts,
) -> Router
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
{
    Router::new()
        .route("/products", get(routes::products::list::<I, P>))
        .route("/products/buy", post(routes::products::buy::<I, P>))
        .with_state(state)
        .route_layer(middleware::from_fn(common::observability::track_http_metrics))
        .merge(common::observability::router(metrics_handle, log_counts))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
