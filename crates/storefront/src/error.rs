//! Downstream failures and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A failed call to the inventory or payment service.
///
/// Application rejections and transport failures are kept apart here for
/// logging, but both fail the step and surface to callers as prose.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownstreamError {
    /// The service answered with a non-success status; carries its body verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or the exchange broke off.
    #[error("{service} service unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },

    /// The service answered successfully but the body could not be decoded.
    #[error("{service} service returned an invalid response: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

impl DownstreamError {
    pub fn unavailable(service: &'static str, reason: impl std::fmt::Display) -> Self {
        DownstreamError::Unavailable {
            service,
            reason: reason.to_string(),
        }
    }

    /// Returns true for transport-level failures.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DownstreamError::Unavailable { .. })
    }
}

/// Used when a proxied call fails outright: the storefront has nothing to show.
impl IntoResponse for DownstreamError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "downstream call failed");
        (StatusCode::BAD_GATEWAY, self.to_string()).into_response()
    }
}
