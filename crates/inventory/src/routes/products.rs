//! Catalog listing and reservation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::InventoryError;

/// GET /products returns the catalog as a JSON array of names.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    tracing::debug!("listing products");
    Json(state.inventory.list_products())
}

/// POST /products/reserve/{product} reserves one unit and answers in plain text.
#[tracing::instrument(skip(state))]
pub async fn reserve(
    State(state): State<Arc<AppState>>,
    Path(product): Path<String>,
) -> Result<String, InventoryError> {
    let reservation = state.inventory.reserve(&product)?;
    Ok(reservation.to_string())
}

/// POST /products/reserve/ is a reservation for the empty product name.
#[tracing::instrument(skip(state))]
pub async fn reserve_unnamed(
    State(state): State<Arc<AppState>>,
) -> Result<String, InventoryError> {
    let reservation = state.inventory.reserve("")?;
    Ok(reservation.to_string())
}
