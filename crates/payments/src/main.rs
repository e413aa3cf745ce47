//! Payment service entry point.

use common::ServerConfig;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env(payments::DEFAULT_PORT).expect("invalid configuration");

    let log_counts = common::init_tracing(&config.log_level, config.log_format);

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let app = payments::create_app(payments::create_default_state(), metrics_handle, log_counts);

    common::server::serve("payments", &config.addr(), app)
        .await
        .expect("server error");
}
