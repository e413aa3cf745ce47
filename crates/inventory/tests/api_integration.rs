//! Integration tests for the inventory HTTP API.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{LogCounts, RandomSource, ScriptedRandom};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup(random: impl RandomSource + 'static) -> axum::Router {
    let state = inventory::AppState::new(Arc::new(random));
    inventory::create_app(state, get_metrics_handle(), LogCounts::new())
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn reserve_request(product: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/products/reserve/{product}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_list_products_returns_catalog() {
    let app = setup(ScriptedRandom::constant(1));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<String> = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(products, inventory::CATALOG.to_vec());
}

#[tokio::test]
async fn test_reserve_known_product() {
    let app = setup(ScriptedRandom::constant(3));

    let response = app.oneshot(reserve_request("bread")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Product bread reserved");
}

#[tokio::test]
async fn test_reserve_unknown_product() {
    let app = setup(ScriptedRandom::constant(3));

    let response = app.oneshot(reserve_request("caviar")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Product caviar not found");
}

#[tokio::test]
async fn test_reserve_is_case_sensitive() {
    let app = setup(ScriptedRandom::constant(3));

    let response = app.oneshot(reserve_request("Milk")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Product Milk not found");
}

#[tokio::test]
async fn test_reserve_out_of_stock() {
    let app = setup(ScriptedRandom::constant(0));

    let response = app.oneshot(reserve_request("cheese")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Product cheese out of stock");
}

#[tokio::test]
async fn test_reserve_empty_name_is_not_found() {
    let app = setup(ScriptedRandom::constant(3));

    let response = app.oneshot(reserve_request("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Product  not found");
}

#[tokio::test]
async fn test_reserve_decodes_path_segment() {
    let app = setup(ScriptedRandom::constant(3));

    let response = app.oneshot(reserve_request("green%20apples")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Product green apples not found");
}

#[tokio::test]
async fn test_health_and_metrics_are_mounted() {
    let app = setup(ScriptedRandom::constant(1));

    let health = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    // Generate at least one routed request so the counter exists.
    app.clone().oneshot(reserve_request("milk")).await.unwrap();

    let metrics = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(metrics.status(), StatusCode::OK);
    let text = body_text(metrics).await;
    assert!(text.contains("inventory_reservations_total"));
}
