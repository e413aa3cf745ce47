//! The catalog and the reservation check.
//!
//! Stock is a probability rather than a counter: every reservation of a
//! catalog product is an independent draw, and nothing is decremented.

use std::sync::Arc;

use common::RandomSource;

use crate::error::InventoryError;

/// The fixed catalog, in listing order.
pub const CATALOG: [&str; 10] = [
    "milk", "bread", "cheese", "apples", "oranges", "bananas", "eggs", "chicken", "fish",
    "tomatoes",
];

/// One reservation in this many reports the product out of stock.
pub const OUT_OF_STOCK_ODDS: u64 = 10;

/// A granted reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub product: String,
}

impl std::fmt::Display for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Product {} reserved", self.product)
    }
}

/// Stateless inventory backed by the fixed [`CATALOG`].
#[derive(Clone)]
pub struct Inventory {
    random: Arc<dyn RandomSource>,
}

impl Inventory {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Returns the catalog names in stable order.
    pub fn list_products(&self) -> Vec<String> {
        CATALOG.iter().map(|p| p.to_string()).collect()
    }

    /// Returns true if `product` is in the catalog.
    pub fn contains(&self, product: &str) -> bool {
        CATALOG.contains(&product)
    }

    /// Attempts to reserve one unit of `product`.
    ///
    /// Unknown products always fail with [`InventoryError::NotFound`] without
    /// consuming a random draw.
    pub fn reserve(&self, product: &str) -> Result<Reservation, InventoryError> {
        tracing::debug!(product, "reserving product");

        let result = if !self.contains(product) {
            Err(InventoryError::NotFound(product.to_string()))
        } else if self.random.below(OUT_OF_STOCK_ODDS) == 0 {
            Err(InventoryError::OutOfStock(product.to_string()))
        } else {
            Ok(Reservation {
                product: product.to_string(),
            })
        };

        match &result {
            Ok(_) => {
                metrics::counter!("inventory_reservations_total", "outcome" => "reserved")
                    .increment(1);
                tracing::debug!(product, "product reserved");
            }
            Err(e) => {
                metrics::counter!("inventory_reservations_total", "outcome" => e.outcome())
                    .increment(1);
                tracing::warn!(product, reason = %e, "reservation refused");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use common::{ScriptedRandom, SeededRandom};

    use super::*;

    fn inventory_with(random: impl RandomSource + 'static) -> Inventory {
        Inventory::new(Arc::new(random))
    }

    #[test]
    fn test_catalog_has_ten_products_in_stable_order() {
        let inventory = inventory_with(ScriptedRandom::constant(1));
        let first = inventory.list_products();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0], "milk");
        assert_eq!(first[9], "tomatoes");
        for _ in 0..5 {
            assert_eq!(inventory.list_products(), first);
        }
    }

    #[test]
    fn test_unknown_product_always_not_found() {
        // Draw 0 would mean out of stock for a catalog product.
        let inventory = inventory_with(ScriptedRandom::constant(0));
        for name in ["unknown", "Milk", "MILK", " milk", "", "milk\n"] {
            for _ in 0..100 {
                assert_eq!(
                    inventory.reserve(name),
                    Err(InventoryError::NotFound(name.to_string()))
                );
            }
        }
    }

    #[test]
    fn test_zero_draw_is_out_of_stock() {
        let inventory = inventory_with(ScriptedRandom::constant(0));
        assert_eq!(
            inventory.reserve("cheese"),
            Err(InventoryError::OutOfStock("cheese".to_string()))
        );
    }

    #[test]
    fn test_nonzero_draw_reserves() {
        let inventory = inventory_with(ScriptedRandom::new(1..OUT_OF_STOCK_ODDS));
        for _ in 1..OUT_OF_STOCK_ODDS {
            let reservation = inventory.reserve("eggs").unwrap();
            assert_eq!(reservation.product, "eggs");
            assert_eq!(reservation.to_string(), "Product eggs reserved");
        }
    }

    #[test]
    fn test_reservations_do_not_deplete_stock() {
        let inventory = inventory_with(ScriptedRandom::constant(5));
        for _ in 0..1_000 {
            assert!(inventory.reserve("fish").is_ok());
        }
    }

    #[test]
    fn test_out_of_stock_rate_near_one_in_ten() {
        let inventory = inventory_with(SeededRandom::new(7));
        let trials = 10_000;
        let failures = (0..trials)
            .filter(|i| {
                let product = CATALOG[i % CATALOG.len()];
                matches!(inventory.reserve(product), Err(InventoryError::OutOfStock(_)))
            })
            .count();
        let rate = failures as f64 / trials as f64;
        assert!((0.08..=0.12).contains(&rate), "observed rate {rate}");
    }
}
