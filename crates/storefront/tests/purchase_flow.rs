//! End-to-end tests: the storefront router talking over HTTP to real
//! inventory and payment services bound on loopback ports.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use common::{LogCounts, RandomSource, ScriptedRandom, ThreadRandom};
use metrics_exporter_prometheus::PrometheusHandle;
use reqwest::Url;
use storefront::{AppState, HttpInventoryClient, HttpPaymentClient};
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

async fn spawn(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// A loopback URL with nothing listening behind it.
async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

async fn spawn_inventory(random: impl RandomSource + 'static) -> Url {
    let state = inventory::AppState::new(Arc::new(random));
    spawn(inventory::create_app(state, get_metrics_handle(), LogCounts::new())).await
}

async fn spawn_payments(random: impl RandomSource + 'static) -> Url {
    let state = payments::AppState::new(Arc::new(random));
    spawn(payments::create_app(state, get_metrics_handle(), LogCounts::new())).await
}

/// A payment endpoint that accepts everything and counts invocations.
async fn spawn_counting_payments(calls: Arc<AtomicUsize>) -> Url {
    let app = Router::new().route(
        "/pay/{sum}",
        post(move || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                "Payment of the client John succeeded"
            }
        }),
    );
    spawn(app).await
}

fn storefront_app(inventory: Url, payments: Url, random: impl RandomSource + 'static) -> Router {
    let client = reqwest::Client::new();
    let state = AppState::new(
        HttpInventoryClient::new(client.clone(), inventory),
        HttpPaymentClient::new(client, payments),
        Arc::new(random),
    );
    storefront::create_app(state, get_metrics_handle(), LogCounts::new())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn buy_request(query: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/products/buy?{query}"))
        .body(Body::empty())
        .unwrap()
}

fn products_request() -> Request<Body> {
    Request::builder()
        .uri("/products")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_products_are_proxied_from_inventory() {
    let inventory = spawn_inventory(ThreadRandom).await;
    let app = storefront_app(inventory, dead_url().await, ThreadRandom);

    for _ in 0..3 {
        let (status, body) = send(app.clone(), products_request()).await;
        assert_eq!(status, StatusCode::OK);
        let products: Vec<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(products, inventory::CATALOG.to_vec());
    }
}

#[tokio::test]
async fn test_products_fail_when_inventory_unreachable() {
    let app = storefront_app(dead_url().await, dead_url().await, ThreadRandom);

    let (status, body) = send(app, products_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.starts_with("inventory service unavailable"), "{body}");
}

#[tokio::test]
async fn test_successful_purchase() {
    let inventory = spawn_inventory(ScriptedRandom::constant(1)).await;
    // Client 2 -> George; balance draw 99_999 cents covers 100.00.
    let payments = spawn_payments(ScriptedRandom::new([2, 99_999])).await;
    let app = storefront_app(inventory, payments, ScriptedRandom::constant(0));

    let (status, body) = send(app, buy_request("product=milk")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "The product milk was bought for 100.00");
}

#[tokio::test]
async fn test_out_of_stock_never_reaches_payments() {
    let inventory = spawn_inventory(ScriptedRandom::constant(0)).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let payments = spawn_counting_payments(calls.clone()).await;
    let app = storefront_app(inventory, payments, ThreadRandom);

    for _ in 0..20 {
        let (status, body) = send(app.clone(), buy_request("product=cheese")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Product cheese out of stock");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_product_never_reaches_payments() {
    let inventory = spawn_inventory(ThreadRandom).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let payments = spawn_counting_payments(calls.clone()).await;
    let app = storefront_app(inventory, payments, ThreadRandom);

    let (status, body) = send(app, buy_request("product=unknown-item")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Product unknown-item not found");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_counting_payments_sees_each_reserved_purchase() {
    let inventory = spawn_inventory(ScriptedRandom::constant(1)).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let payments = spawn_counting_payments(calls.clone()).await;
    let app = storefront_app(inventory, payments, ThreadRandom);

    for _ in 0..5 {
        let (status, _) = send(app.clone(), buy_request("product=eggs")).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_declined_payment_is_reported() {
    let inventory = spawn_inventory(ScriptedRandom::constant(1)).await;
    // Client 0 -> John; balance draw 0 never covers the amount.
    let payments = spawn_payments(ScriptedRandom::constant(0)).await;
    let app = storefront_app(inventory, payments, ThreadRandom);

    let (status, body) = send(app, buy_request("product=bread")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Not enough money on the account John");
}

#[tokio::test]
async fn test_unreachable_payments_is_reported() {
    let inventory = spawn_inventory(ScriptedRandom::constant(1)).await;
    let app = storefront_app(inventory, dead_url().await, ThreadRandom);

    let (status, body) = send(app, buy_request("product=fish")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("payments service unavailable"), "{body}");
}

#[tokio::test]
async fn test_product_names_are_encoded_for_inventory() {
    let inventory = spawn_inventory(ThreadRandom).await;
    let app = storefront_app(inventory, dead_url().await, ThreadRandom);

    let (status, body) = send(app, buy_request("product=green%20apples%2Fripe")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Product green apples/ripe not found");
}

#[tokio::test]
async fn test_unaddressable_names_are_not_found_by_name() {
    let inventory = spawn_inventory(ScriptedRandom::constant(1)).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let payments = spawn_counting_payments(calls.clone()).await;
    let app = storefront_app(inventory, payments, ThreadRandom);

    for (query, product) in [("product=", ""), ("product=.", "."), ("product=..", "..")] {
        let (status, body) = send(app.clone(), buy_request(query)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body, format!("Product {product} not found"));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_product_parameter_is_rejected() {
    let app = storefront_app(dead_url().await, dead_url().await, ThreadRandom);

    let (status, _) = send(app, buy_request("item=milk")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_over_http() {
    let inventory = spawn_inventory(ThreadRandom).await;
    let payments = spawn_payments(ThreadRandom).await;
    let app = storefront_app(inventory, payments, ThreadRandom);

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { send(app, buy_request("product=tomatoes")).await })
        })
        .collect();

    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::OK => assert!(body.starts_with("The product tomatoes was bought for ")),
            StatusCode::BAD_REQUEST => assert!(
                body == "Product tomatoes out of stock"
                    || body.starts_with("Not enough money on the account "),
                "{body}"
            ),
            other => panic!("unexpected status {other}: {body}"),
        }
    }
}
