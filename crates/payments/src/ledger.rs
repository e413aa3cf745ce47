//! Synthetic client ledger.
//!
//! There are no durable accounts. Every charge draws a client from a fixed
//! list and a balance uniformly from `[0, 10 × amount)`, so any positive
//! amount is covered nine times out of ten.

use std::sync::Arc;

use common::{Amount, RandomSource};

use crate::error::PaymentError;

/// Client names, drawn uniformly per charge.
pub const CLIENTS: [&str; 11] = [
    "John", "Paul", "George", "Ringo", "Yoko", "Pete", "Mick", "Keith", "Charlie", "Ronnie",
    "David",
];

/// The drawn balance is strictly below this multiple of the charged amount.
pub const BALANCE_CEILING_FACTOR: i64 = 10;

/// Masks a name for logs, keeping the first and last character and the length.
///
/// Names of two characters or fewer are masked entirely.
pub fn mask_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 2 {
        return "*".repeat(chars.len());
    }
    let mut masked = String::with_capacity(name.len());
    masked.push(chars[0]);
    masked.extend(std::iter::repeat_n('*', chars.len() - 2));
    masked.push(chars[chars.len() - 1]);
    masked
}

/// A client account generated for a single charge.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientAccount {
    pub name: String,
    pub balance: Amount,
}

/// Debug output masks the name and omits the balance.
impl std::fmt::Debug for ClientAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientAccount")
            .field("name", &mask_name(&self.name))
            .finish_non_exhaustive()
    }
}

/// A successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub client: String,
    pub amount: Amount,
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Payment of the client {} succeeded", self.client)
    }
}

/// Authorizes charges against freshly drawn accounts.
#[derive(Clone)]
pub struct Ledger {
    random: Arc<dyn RandomSource>,
}

impl Ledger {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Draws a client and a balance in `[0, 10 × amount)`.
    ///
    /// A zero amount yields a zero balance without drawing one.
    pub fn draw_account(&self, amount: Amount) -> Result<ClientAccount, PaymentError> {
        if amount.is_negative() {
            return Err(PaymentError::InvalidAmount(amount.to_string()));
        }
        let ceiling = amount
            .checked_mul(BALANCE_CEILING_FACTOR)
            .ok_or_else(|| PaymentError::InvalidAmount(amount.to_string()))?;

        let name = CLIENTS[self.random.below(CLIENTS.len() as u64) as usize].to_string();
        let balance = if ceiling.is_zero() {
            Amount::zero()
        } else {
            Amount::from_cents(self.random.below(ceiling.cents() as u64) as i64)
        };

        Ok(ClientAccount { name, balance })
    }

    /// Parses `sum` and charges it.
    ///
    /// A malformed sum is declined as [`PaymentError::InvalidAmount`] and
    /// counted like any other declined charge.
    pub fn charge_sum(&self, sum: &str) -> Result<Receipt, PaymentError> {
        match sum.parse::<Amount>() {
            Ok(amount) => self.charge(amount),
            Err(e) => {
                let err = PaymentError::from(e);
                record_decline(&sum, &err);
                Err(err)
            }
        }
    }

    /// Charges `amount` to a drawn account.
    ///
    /// `Charge(0)` always succeeds: the zero balance covers the zero amount.
    pub fn charge(&self, amount: Amount) -> Result<Receipt, PaymentError> {
        let result = self.draw_account(amount).and_then(|account| {
            tracing::debug!(%amount, ?account, "paying");
            if account.balance < amount {
                return Err(PaymentError::InsufficientFunds {
                    client: account.name,
                });
            }
            tracing::debug!(%amount, ?account, "payment succeeded");
            Ok(Receipt {
                client: account.name,
                amount,
            })
        });

        match &result {
            Ok(_) => {
                metrics::counter!("payments_total", "outcome" => "succeeded").increment(1);
            }
            Err(e) => record_decline(&amount, e),
        }

        result
    }
}

fn record_decline(amount: &dyn std::fmt::Display, err: &PaymentError) {
    metrics::counter!("payments_total", "outcome" => err.outcome()).increment(1);
    match err {
        PaymentError::InsufficientFunds { client } => {
            tracing::warn!(%amount, client = %mask_name(client), "not enough money on the account");
        }
        PaymentError::InvalidAmount(_) => {
            tracing::warn!(%amount, "invalid amount");
        }
    }
}
