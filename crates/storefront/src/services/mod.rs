//! Downstream service clients: traits, HTTP implementations and in-memory fakes.

pub mod inventory;
pub mod payment;

pub use inventory::{HttpInventoryClient, InMemoryInventoryClient, InventoryClient};
pub use payment::{HttpPaymentClient, InMemoryPaymentClient, PaymentClient};

use reqwest::Url;

use crate::error::DownstreamError;

/// Builds a downstream URL, failing the call when the base cannot carry a path.
fn endpoint(
    service: &'static str,
    base: &Url,
    segments: &[&str],
) -> Result<Url, DownstreamError> {
    common::endpoint::append_segments(base, segments)
        .ok_or_else(|| DownstreamError::unavailable(service, format!("{base} is not a base URL")))
}

/// Turns a response into its text body, failing on any non-success status.
async fn read_text(
    service: &'static str,
    sent: Result<reqwest::Response, reqwest::Error>,
) -> Result<String, DownstreamError> {
    let response = sent.map_err(|e| DownstreamError::unavailable(service, e))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DownstreamError::unavailable(service, e))?;

    if status.is_success() {
        Ok(body)
    } else if body.is_empty() {
        Err(DownstreamError::Rejected(format!("{service} service answered {status}")))
    } else {
        Err(DownstreamError::Rejected(body))
    }
}
