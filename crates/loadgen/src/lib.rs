//! Synthetic traffic for the storefront.
//!
//! Each worker pauses for a random interval, lists the catalog and buys a
//! random entry, occasionally asking for a product that does not exist.
//! Failures of any kind are logged and ignored.

pub mod config;
pub mod driver;

pub use config::LoadConfig;
pub use driver::{LoadError, LoadGenerator, LoadSummary, TickOutcome, UNKNOWN_PRODUCT, pick_product};
