//! Storefront configuration: listener settings plus downstream service locations.

use common::{ConfigError, ServerConfig};
use reqwest::Url;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Where the downstream services live.
///
/// Reads from environment variables:
/// - `INVENTORY_URL` (default: `"http://localhost:8081"`)
/// - `PAYMENTS_URL` (default: `"http://localhost:8082"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLocator {
    pub inventory: Url,
    pub payments: Url,
}

impl ServiceLocator {
    pub fn new(inventory: Url, payments: Url) -> Self {
        Self {
            inventory,
            payments,
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            inventory: parse_base_url(
                "INVENTORY_URL",
                lookup("INVENTORY_URL").unwrap_or_else(|| "http://localhost:8081".to_string()),
            )?,
            payments: parse_base_url(
                "PAYMENTS_URL",
                lookup("PAYMENTS_URL").unwrap_or_else(|| "http://localhost:8082".to_string()),
            )?,
        })
    }
}

fn parse_base_url(key: &'static str, raw: String) -> Result<Url, ConfigError> {
    match Url::parse(&raw) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}

/// Full storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub server: ServerConfig,
    pub services: ServiceLocator,
}

impl StorefrontConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_lookup(DEFAULT_PORT, &lookup)?,
            services: ServiceLocator::from_lookup(&lookup)?,
        })
    }
}
