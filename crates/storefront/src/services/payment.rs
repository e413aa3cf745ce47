//! Payment client trait, HTTP implementation and in-memory fake.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::Amount;
use reqwest::Url;

use crate::error::DownstreamError;

const SERVICE: &str = "payments";

/// Operations the storefront needs from the payment service.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Charges `amount`, returning the service's confirmation text.
    async fn charge(&self, amount: Amount) -> Result<String, DownstreamError>;
}

/// Talks to the payment service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPaymentClient {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl PaymentClient for HttpPaymentClient {
    async fn charge(&self, amount: Amount) -> Result<String, DownstreamError> {
        let sum = amount.to_string();
        let url = super::endpoint(SERVICE, &self.base_url, &["pay", sum.as_str()])?;
        super::read_text(SERVICE, self.client.post(url).send().await).await
    }
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    charges: Vec<Amount>,
    decline_with: Option<String>,
    unavailable: bool,
}

/// In-memory payment service for testing. Records every charge attempt.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentClient {
    state: Arc<Mutex<InMemoryPaymentState>>,
}

impl InMemoryPaymentClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryPaymentState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Declines every charge with the given message, or accepts again with `None`.
    pub fn set_decline(&self, message: Option<&str>) {
        self.lock().decline_with = message.map(str::to_string);
    }

    /// Makes every call fail as if the service were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Returns how many charges were attempted.
    pub fn charge_calls(&self) -> usize {
        self.lock().charges.len()
    }

    /// Returns every attempted amount, in call order.
    pub fn charges(&self) -> Vec<Amount> {
        self.lock().charges.clone()
    }
}

#[async_trait]
impl PaymentClient for InMemoryPaymentClient {
    async fn charge(&self, amount: Amount) -> Result<String, DownstreamError> {
        let mut state = self.lock();
        state.charges.push(amount);

        if state.unavailable {
            return Err(DownstreamError::unavailable(SERVICE, "connection refused"));
        }
        if let Some(message) = &state.decline_with {
            return Err(DownstreamError::Rejected(message.clone()));
        }
        Ok("Payment of the client John succeeded".to_string())
    }
}
