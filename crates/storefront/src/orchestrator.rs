//! Purchase orchestration.
//!
//! A purchase is two strictly sequential downstream steps: reserve the product
//! with the inventory service, then charge a generated amount with the payment
//! service. The first failure ends the purchase. Nothing is retried and nothing
//! is compensated: a payment failure leaves the reservation in place.

use std::sync::Arc;
use std::time::Instant;

use common::{Amount, RandomSource};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::DownstreamError;
use crate::purchase::{MAX_PRICE_UNITS, MIN_PRICE_UNITS, PurchaseResult, PurchaseStatus};
use crate::services::inventory::InventoryClient;
use crate::services::payment::PaymentClient;

/// Coordinates catalog listing and purchases across inventory and payments.
pub struct Storefront<I, P>
where
    I: InventoryClient,
    P: PaymentClient,
{
    inventory: I,
    payments: P,
    random: Arc<dyn RandomSource>,
}

impl<I, P> Storefront<I, P>
where
    I: InventoryClient,
    P: PaymentClient,
{
    pub fn new(inventory: I, payments: P, random: Arc<dyn RandomSource>) -> Self {
        Self {
            inventory,
            payments,
            random,
        }
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    /// Forwards the inventory's catalog. Failures propagate with no fallback.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<String>, DownstreamError> {
        tracing::debug!("getting products");
        self.inventory.list_products().await
    }

    /// Buys `product` for an amount drawn from `[100, 10000)`.
    ///
    /// Always returns exactly one terminal result. Payment is contacted only
    /// after a successful reservation.
    #[tracing::instrument(
        skip(self),
        fields(purchase_id = tracing::field::Empty, amount = tracing::field::Empty)
    )]
    pub async fn buy(&self, product: &str) -> PurchaseResult {
        let started = Instant::now();
        let purchase_id = Uuid::new_v4();
        let amount = Amount::from_units(
            self.random.between(MIN_PRICE_UNITS, MAX_PRICE_UNITS) as i64,
        );

        let span = tracing::Span::current();
        span.record("purchase_id", tracing::field::display(purchase_id));
        span.record("amount", tracing::field::display(amount));
        tracing::debug!(product, %amount, "buying product");

        let result = self.run(purchase_id, product, amount).await;

        metrics::counter!("purchases_total", "status" => result.status.as_str()).increment(1);
        metrics::histogram!("purchase_duration_seconds").record(started.elapsed().as_secs_f64());

        result
    }

    async fn run(&self, purchase_id: Uuid, product: &str, amount: Amount) -> PurchaseResult {
        // Step 1: reserve.
        let reservation = self
            .inventory
            .reserve(product)
            .instrument(tracing::info_span!("reserving", product))
            .await;
        if let Err(e) = reservation {
            tracing::warn!(product, error = %e, "reservation failed");
            return PurchaseResult::failed(
                purchase_id,
                product,
                amount,
                PurchaseStatus::ReservationFailed,
                e.to_string(),
            );
        }

        // Step 2: charge. The reservation is not released if this fails.
        let payment = self
            .payments
            .charge(amount)
            .instrument(tracing::info_span!("paying", %amount))
            .await;
        if let Err(e) = payment {
            tracing::warn!(product, %amount, error = %e, "payment failed");
            return PurchaseResult::failed(
                purchase_id,
                product,
                amount,
                PurchaseStatus::PaymentFailed,
                e.to_string(),
            );
        }

        tracing::info!(product, %amount, "product bought");
        PurchaseResult::success(purchase_id, product, amount)
    }
}
