//! Reservation errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Reasons a reservation is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The product is not part of the catalog (exact, case-sensitive match).
    #[error("Product {0} not found")]
    NotFound(String),

    /// The stock-out draw hit.
    #[error("Product {0} out of stock")]
    OutOfStock(String),
}

impl InventoryError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            InventoryError::NotFound(_) => "not_found",
            InventoryError::OutOfStock(_) => "out_of_stock",
        }
    }
}

/// Both failures are client errors carrying the message as plain text.
impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
