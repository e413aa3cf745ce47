//! Purchase outcome types.

use common::Amount;
use serde::Serialize;
use uuid::Uuid;

/// Lowest generated purchase amount, in whole units (inclusive).
pub const MIN_PRICE_UNITS: u64 = 100;

/// Highest generated purchase amount, in whole units (exclusive).
pub const MAX_PRICE_UNITS: u64 = 10_000;

/// Terminal status of a purchase.
///
/// ```text
/// Start ──► Reserving ──┬──► ReservationFailed
///                       └──► Charging ──┬──► PaymentFailed
///                                       └──► Success
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PurchaseStatus {
    Success,
    ReservationFailed,
    PaymentFailed,
}

impl PurchaseStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseStatus::Success)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Success => "Success",
            PurchaseStatus::ReservationFailed => "ReservationFailed",
            PurchaseStatus::PaymentFailed => "PaymentFailed",
        }
    }
}

impl std::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one `buy` call. Produced once, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseResult {
    pub purchase_id: Uuid,
    pub product: String,
    pub amount: Amount,
    pub status: PurchaseStatus,
    /// Success summary, or the failing downstream's message verbatim.
    pub message: String,
}

impl PurchaseResult {
    pub(crate) fn success(purchase_id: Uuid, product: &str, amount: Amount) -> Self {
        Self {
            purchase_id,
            product: product.to_string(),
            amount,
            status: PurchaseStatus::Success,
            message: format!("The product {product} was bought for {amount}"),
        }
    }

    pub(crate) fn failed(
        purchase_id: Uuid,
        product: &str,
        amount: Amount,
        status: PurchaseStatus,
        message: String,
    ) -> Self {
        Self {
            purchase_id,
            product: product.to_string(),
            amount,
            status,
            message,
        }
    }
}
