//! HTTP route handlers.

pub mod products;
