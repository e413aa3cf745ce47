//! Inventory client trait, HTTP implementation and in-memory fake.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Url;

use crate::error::DownstreamError;

const SERVICE: &str = "inventory";

/// Operations the storefront needs from the inventory service.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Returns the catalog in the inventory's order.
    async fn list_products(&self) -> Result<Vec<String>, DownstreamError>;

    /// Reserves one unit of `product`, returning the service's confirmation text.
    async fn reserve(&self, product: &str) -> Result<String, DownstreamError>;
}

/// Talks to the inventory service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpInventoryClient {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn list_products(&self) -> Result<Vec<String>, DownstreamError> {
        let url = super::endpoint(SERVICE, &self.base_url, &["products"])?;
        let body = super::read_text(SERVICE, self.client.get(url).send().await).await?;

        serde_json::from_str(&body).map_err(|e| DownstreamError::InvalidResponse {
            service: SERVICE,
            reason: e.to_string(),
        })
    }

    async fn reserve(&self, product: &str) -> Result<String, DownstreamError> {
        // Dot names cannot travel as a path segment and are never catalog entries.
        if !common::endpoint::is_addressable(product) {
            tracing::debug!(product, "product name is not addressable");
            return Err(DownstreamError::Rejected(format!(
                "Product {product} not found"
            )));
        }
        let url = super::endpoint(SERVICE, &self.base_url, &["products", "reserve", product])?;
        super::read_text(SERVICE, self.client.post(url).send().await).await
    }
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    products: Vec<String>,
    out_of_stock: bool,
    unavailable: bool,
    reserve_calls: usize,
}

/// In-memory inventory for testing.
///
/// Mirrors the real service's messages: unknown products are not found, and
/// [`set_out_of_stock`](Self::set_out_of_stock) makes every known product fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryClient {
    state: Arc<Mutex<InMemoryInventoryState>>,
}

impl InMemoryInventoryClient {
    pub fn new<S: Into<String>>(products: impl IntoIterator<Item = S>) -> Self {
        let client = Self::default();
        client.lock().products = products.into_iter().map(Into::into).collect();
        client
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryInventoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes every reservation of a known product fail with out of stock.
    pub fn set_out_of_stock(&self, out_of_stock: bool) {
        self.lock().out_of_stock = out_of_stock;
    }

    /// Makes every call fail as if the service were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Returns how many reservations were attempted.
    pub fn reserve_calls(&self) -> usize {
        self.lock().reserve_calls
    }
}

#[async_trait]
impl InventoryClient for InMemoryInventoryClient {
    async fn list_products(&self) -> Result<Vec<String>, DownstreamError> {
        let state = self.lock();
        if state.unavailable {
            return Err(DownstreamError::unavailable(SERVICE, "connection refused"));
        }
        Ok(state.products.clone())
    }

    async fn reserve(&self, product: &str) -> Result<String, DownstreamError> {
        let mut state = self.lock();
        state.reserve_calls += 1;

        if state.unavailable {
            return Err(DownstreamError::unavailable(SERVICE, "connection refused"));
        }
        if !state.products.iter().any(|p| p == product) {
            return Err(DownstreamError::Rejected(format!(
                "Product {product} not found"
            )));
        }
        if state.out_of_stock {
            return Err(DownstreamError::Rejected(format!(
                "Product {product} out of stock"
            )));
        }
        Ok(format!("Product {product} reserved"))
    }
}
