//! The traffic loop: pause, list the catalog, buy something.

use std::sync::Arc;
use std::time::Duration;

use common::RandomSource;
use reqwest::Url;
use thiserror::Error;

/// Product name used for the one-in-(n+1) deliberately invalid purchase.
pub const UNKNOWN_PRODUCT: &str = "unknown";

/// Errors from a single tick. The loop logs and ignores them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storefront answered {status} to the catalog request")]
    Catalog { status: u16 },

    #[error("{0} is not a base URL")]
    InvalidUrl(Url),
}

/// What one purchase attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub product: String,
    pub status: u16,
    pub message: String,
}

impl TickOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Aggregate counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub succeeded: u64,
    pub rejected: u64,
    pub errors: u64,
}

/// Picks a catalog entry, or [`UNKNOWN_PRODUCT`] with probability `1 / (len + 1)`.
pub fn pick_product(products: &[String], random: &dyn RandomSource) -> String {
    let index = random.below(products.len() as u64 + 1) as usize;
    products
        .get(index)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string())
}

/// Drives random purchases against one storefront.
#[derive(Clone)]
pub struct LoadGenerator {
    client: reqwest::Client,
    shop_url: Url,
    random: Arc<dyn RandomSource>,
    max_delay: Duration,
}

impl LoadGenerator {
    pub fn new(
        client: reqwest::Client,
        shop_url: Url,
        random: Arc<dyn RandomSource>,
        max_delay: Duration,
    ) -> Self {
        Self {
            client,
            shop_url,
            random,
            max_delay,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, LoadError> {
        common::endpoint::append_segments(&self.shop_url, segments)
            .ok_or_else(|| LoadError::InvalidUrl(self.shop_url.clone()))
    }

    /// Pauses, fetches the catalog and attempts one purchase.
    pub async fn tick(&self) -> Result<TickOutcome, LoadError> {
        let delay_ms = self.random.below(self.max_delay.as_millis() as u64);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let response = self
            .client
            .get(self.endpoint(&["products"])?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(LoadError::Catalog {
                status: response.status().as_u16(),
            });
        }
        let products: Vec<String> = response.json().await?;

        let product = pick_product(&products, self.random.as_ref());
        let response = self
            .client
            .post(self.endpoint(&["products", "buy"])?)
            .query(&[("product", product.as_str())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let message = response.text().await?;

        Ok(TickOutcome {
            product,
            status,
            message,
        })
    }

    /// Runs `iterations` ticks, or forever when `None`.
    pub async fn run(&self, iterations: Option<u64>) -> LoadSummary {
        let mut summary = LoadSummary::default();
        let mut done = 0u64;

        while iterations.is_none_or(|limit| done < limit) {
            match self.tick().await {
                Ok(outcome) if outcome.is_success() => {
                    summary.succeeded += 1;
                    tracing::debug!(product = %outcome.product, message = %outcome.message, "purchase succeeded");
                }
                Ok(outcome) => {
                    summary.rejected += 1;
                    tracing::debug!(product = %outcome.product, status = outcome.status, message = %outcome.message, "purchase rejected");
                }
                Err(e) => {
                    summary.errors += 1;
                    tracing::debug!(error = %e, "tick failed");
                }
            }
            done += 1;
        }

        summary
    }
}
