//! Catalog proxy and purchase endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::AppState;
use crate::error::DownstreamError;
use crate::purchase::PurchaseResult;
use crate::services::{InventoryClient, PaymentClient};

#[derive(Debug, Deserialize)]
pub struct BuyParams {
    pub product: String,
}

/// Success is 200, either failure is 400; the body is the result message.
impl IntoResponse for PurchaseResult {
    fn into_response(self) -> Response {
        let status = if self.status.is_success() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, self.message).into_response()
    }
}

/// GET /products proxies the inventory's catalog verbatim.
#[tracing::instrument(skip(state))]
pub async fn list<I, P>(
    State(state): State<Arc<AppState<I, P>>>,
) -> Result<Json<Vec<String>>, DownstreamError>
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
{
    let products = state.storefront.list_products().await?;
    Ok(Json(products))
}

/// POST /products/buy?product={name} runs one purchase.
#[tracing::instrument(skip(state))]
pub async fn buy<I, P>(
    State(state): State<Arc<AppState<I, P>>>,
    Query(params): Query<BuyParams>,
) -> PurchaseResult
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
{
    state.storefront.buy(&params.product).await
}
