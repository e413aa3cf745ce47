//! Load generator configuration loaded from environment variables.

use std::time::Duration;

use common::{ConfigError, LogFormat};
use reqwest::Url;

/// Driver settings.
///
/// Reads from environment variables:
/// - `SHOP_URL`: storefront base URL (default: `"http://localhost:8080"`)
/// - `MAX_DELAY_MS`: upper bound of the random pause between purchases (default: `1000`)
/// - `WORKERS`: number of concurrent loops (default: `1`)
/// - `ITERATIONS`: ticks per worker; unset runs forever
/// - `LOG_LEVEL` / `LOG_FORMAT`: as for the services
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub shop_url: Url,
    pub max_delay: Duration,
    pub workers: usize,
    pub iterations: Option<u64>,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl LoadConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SHOP_URL").unwrap_or_else(|| "http://localhost:8080".to_string());
        let shop_url = match Url::parse(&raw_url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "SHOP_URL",
                    value: raw_url,
                });
            }
        };

        let max_delay_ms: u64 = parse_or(&lookup, "MAX_DELAY_MS", 1000)?;
        let workers: usize = parse_or(&lookup, "WORKERS", 1)?;
        if workers == 0 {
            return Err(ConfigError::Invalid {
                key: "WORKERS",
                value: "0".to_string(),
            });
        }
        let iterations = match lookup("ITERATIONS") {
            Some(raw) => Some(raw.parse().map_err(|_| ConfigError::Invalid {
                key: "ITERATIONS",
                value: raw,
            })?),
            None => None,
        };
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            shop_url,
            max_delay: Duration::from_millis(max_delay_ms),
            workers,
            iterations,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
