//! Storefront entry point.

use storefront::StorefrontConfig;

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("invalid configuration");

    // 1. Initialize tracing
    let log_counts = common::init_tracing(&config.server.log_level, config.server.log_format);
    tracing::info!(
        inventory = %config.services.inventory,
        payments = %config.services.payments,
        "resolved downstream services"
    );

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build the application
    let state = storefront::create_default_state(&config.services);
    let app = storefront::create_app(state, metrics_handle, log_counts);

    // 4. Start server
    common::server::serve("storefront", &config.server.addr(), app)
        .await
        .expect("server error");
}
