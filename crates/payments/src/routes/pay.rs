//! Charge endpoint.

use std::sync::Arc;

use axum::extract::{Path, State};

use crate::AppState;
use crate::error::PaymentError;

/// POST /pay/{sum} charges `sum` to a drawn client and answers in plain text.
#[tracing::instrument(skip(state))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(sum): Path<String>,
) -> Result<String, PaymentError> {
    let receipt = state.ledger.charge_sum(&sum)?;
    Ok(receipt.to_string())
}
