//! HTTP route handlers.

pub mod pay;
