//! Inventory service entry point.

use common::ServerConfig;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env(inventory::DEFAULT_PORT).expect("invalid configuration");

    // 1. Initialize tracing
    let log_counts = common::init_tracing(&config.log_level, config.log_format);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build the application
    let app = inventory::create_app(inventory::create_default_state(), metrics_handle, log_counts);

    // 4. Start server
    common::server::serve("inventory", &config.addr(), app)
        .await
        .expect("server error");
}
