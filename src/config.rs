use crate::domain::Decimal;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DATA_API_URL: &str = "https://data-api.polymarket.com";
pub const DEFAULT_GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_api_url: String,
    pub gamma_api_url: String,
    /// Page size for the `/trades` endpoint.
    pub trades_page_limit: usize,
    /// Probability at or above which the latest trade's outcome is taken as
    /// the winner.
    pub resolution_threshold: Decimal,
    pub request_timeout_secs: u64,
    /// Idle time after which an analysis session is dropped.
    pub session_ttl_secs: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let data_api_url = env_map
            .get("DATA_API_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_DATA_API_URL.to_string());

        let gamma_api_url = env_map
            .get("GAMMA_API_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_GAMMA_API_URL.to_string());

        let trades_page_limit = env_map
            .get("TRADES_PAGE_LIMIT")
            .map(|s| s.as_str())
            .unwrap_or("500")
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "TRADES_PAGE_LIMIT".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let resolution_threshold = env_map
            .get("RESOLUTION_THRESHOLD")
            .map(|s| s.as_str())
            .unwrap_or("0.5")
            .parse::<Decimal>()
            .ok()
            .filter(|t| *t >= Decimal::zero() && *t <= Decimal::one())
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "RESOLUTION_THRESHOLD".to_string(),
                    "must be a number between 0 and 1".to_string(),
                )
            })?;

        let request_timeout_secs = env_map
            .get("REQUEST_TIMEOUT_SECS")
            .map(|s| s.as_str())
            .unwrap_or("15")
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "REQUEST_TIMEOUT_SECS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let session_ttl_secs = env_map
            .get("SESSION_TTL_SECS")
            .map(|s| s.as_str())
            .unwrap_or("3600")
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SESSION_TTL_SECS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        Ok(Config {
            port,
            data_api_url,
            gamma_api_url,
            trades_page_limit,
            resolution_threshold,
            request_timeout_secs,
            session_ttl_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            data_api_url: DEFAULT_DATA_API_URL.to_string(),
            gamma_api_url: DEFAULT_GAMMA_API_URL.to_string(),
            trades_page_limit: 500,
            resolution_threshold: Decimal::new(rust_decimal::Decimal::new(5, 1)),
            request_timeout_secs: 15,
            session_ttl_secs: 3600,
        }
    }
}
