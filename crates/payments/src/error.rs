//! Charge errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::AmountParseError;
use thiserror::Error;

/// Reasons a charge is declined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The drawn balance does not cover the amount.
    #[error("Not enough money on the account {client}")]
    InsufficientFunds { client: String },

    /// The amount is malformed, negative, or too large to draw a balance for.
    #[error("Invalid amount {0}")]
    InvalidAmount(String),
}

impl PaymentError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            PaymentError::InsufficientFunds { .. } => "insufficient_funds",
            PaymentError::InvalidAmount(_) => "invalid_amount",
        }
    }
}

impl From<AmountParseError> for PaymentError {
    fn from(err: AmountParseError) -> Self {
        PaymentError::InvalidAmount(err.input)
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
