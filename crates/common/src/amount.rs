//! Fixed-point money amount shared by every service.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a decimal amount cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid amount {input}")]
pub struct AmountParseError {
    pub input: String,
}

/// Money amount held as whole cents to avoid floating point issues.
///
/// The currency is implicit: every service in the system agrees on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    /// Creates an amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates an amount from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Self { cents: units * 100 }
    }

    /// Returns zero.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole-unit portion, truncated toward zero.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a factor, returning `None` on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Amount> {
        self.cents.checked_mul(factor).map(Amount::from_cents)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Parses `[-]digits[.d[d]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AmountParseError {
            input: s.to_string(),
        };

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = match body.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (body, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let units: i64 = whole.parse().map_err(|_| err())?;

        let fraction_cents = match fraction {
            None => 0,
            Some(f) if f.is_empty() || f.len() > 2 || !f.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(err());
            }
            Some(f) => {
                let digits: i64 = f.parse().map_err(|_| err())?;
                if f.len() == 1 { digits * 10 } else { digits }
            }
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(err)?;

        Ok(Amount::from_cents(if negative { -cents } else { cents }))
    }
}
