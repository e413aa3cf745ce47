//! Load generator entry point.

use std::sync::Arc;

use common::ThreadRandom;
use loadgen::{LoadConfig, LoadGenerator, LoadSummary};

#[tokio::main]
async fn main() {
    let config = LoadConfig::from_env().expect("invalid configuration");
    let _log_counts = common::init_tracing(&config.log_level, config.log_format);

    let generator = LoadGenerator::new(
        reqwest::Client::new(),
        config.shop_url.clone(),
        Arc::new(ThreadRandom),
        config.max_delay,
    );

    tracing::info!(
        shop = %config.shop_url,
        workers = config.workers,
        iterations = ?config.iterations,
        "starting load generator"
    );

    let mut workers = tokio::task::JoinSet::new();
    for _ in 0..config.workers {
        let generator = generator.clone();
        let iterations = config.iterations;
        workers.spawn(async move { generator.run(iterations).await });
    }

    let drain = async {
        let mut total = LoadSummary::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(summary) => {
                    total.succeeded += summary.succeeded;
                    total.rejected += summary.rejected;
                    total.errors += summary.errors;
                }
                Err(e) => tracing::error!(error = %e, "worker panicked"),
            }
        }
        total
    };

    tokio::select! {
        total = drain => {
            tracing::info!(
                succeeded = total.succeeded,
                rejected = total.rejected,
                errors = total.errors,
                "load generator finished"
            );
        }
        () = common::server::shutdown_signal() => {}
    }
}
