//! Shared building blocks for the inventory, payments and storefront services.
//!
//! Provides the fixed-point [`Amount`], the injectable [`RandomSource`], URL
//! building for inter-service calls, listener configuration, tracing setup
//! with per-severity log counters, and the observability routes every service
//! mounts.

pub mod amount;
pub mod config;
pub mod endpoint;
pub mod observability;
pub mod random;
pub mod server;
pub mod telemetry;

pub use amount::{Amount, AmountParseError};
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use telemetry::{LogCounts, LogCountsSnapshot, LogCountingLayer, init_tracing};
