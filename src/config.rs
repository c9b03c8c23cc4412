//! Environment based configuration.
//!
//! Binaries load a `.env` file first (see `dotenvy`), then read prefixed variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `SURFCAST_API_KEY_PRIMARY` | required |
//! | `SURFCAST_API_KEY_SECONDARY` | required |
//! | `SURFCAST_API_URL` | Stormglass point endpoint |
//! | `SURFCAST_REQUEST_TIMEOUT_SECS` | `30` |
//! | `SURFCAST_DISPLAY_UTC_OFFSET_HOURS` | `-3` |
//! | `SURFCAST_S3_BUCKET` | `surfline` |
//! | `SURFCAST_S3_REGION` | `us-east-1` |
//! | `SURFCAST_S3_ENDPOINT` | unset (AWS) |
//! | `SURFCAST_S3_ACCESS_KEY_ID` | required |
//! | `SURFCAST_S3_SECRET_ACCESS_KEY` | required |
//! | `SURFCAST_S3_ALLOW_HTTP` | `false` |

use crate::forecast::client::DEFAULT_API_URL;
use crate::types::credential::{ApiKey, Credentials};
use chrono::FixedOffset;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PREFIX: &str = "SURFCAST_";
pub const S3_ENV_PREFIX: &str = "SURFCAST_S3_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid or missing configuration in {prefix}* environment variables")]
    Env {
        prefix: &'static str,
        #[source]
        source: envy::Error,
    },

    #[error("UTC offset of {0} hours is out of range")]
    InvalidOffset(i32),
}

/// Settings of the forecast API.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    pub api_key_primary: String,
    pub api_key_secondary: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ForecastConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        from_env(ENV_PREFIX)
    }

    pub fn from_iter(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        from_iter(ENV_PREFIX, vars)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            ApiKey::new(self.api_key_primary.clone()),
            ApiKey::new(self.api_key_secondary.clone()),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Object storage holding the daily artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub allow_http: bool,
}

impl S3Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        from_env(S3_ENV_PREFIX)
    }

    pub fn from_iter(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        from_iter(S3_ENV_PREFIX, vars)
    }
}

/// Read side settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Hours east of UTC used to display times; the spots are on Brazilian time (UTC-3).
    #[serde(default = "default_display_offset")]
    pub display_utc_offset_hours: i32,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        from_env(ENV_PREFIX)
    }

    pub fn from_iter(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        from_iter(ENV_PREFIX, vars)
    }

    pub fn display_offset(&self) -> Result<FixedOffset, ConfigError> {
        self.display_utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidOffset(self.display_utc_offset_hours))
    }
}

fn from_env<T: DeserializeOwned>(prefix: &'static str) -> Result<T, ConfigError> {
    envy::prefixed(prefix)
        .from_env::<T>()
        .map_err(|e| ConfigError::Env { prefix, source: e })
}

fn from_iter<T: DeserializeOwned>(
    prefix: &'static str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<T, ConfigError> {
    envy::prefixed(prefix)
        .from_iter::<_, T>(vars)
        .map_err(|e| ConfigError::Env { prefix, source: e })
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_bucket() -> String {
    "surfline".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_display_offset() -> i32 {
    -3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_forecast_config_defaults() {
        let config = ForecastConfig::from_iter(vars(&[
            ("SURFCAST_API_KEY_PRIMARY", "key-1"),
            ("SURFCAST_API_KEY_SECONDARY", "key-2"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        let credentials = config.credentials();
        assert_eq!(credentials.primary.expose(), "key-1");
        assert_eq!(credentials.secondary.expose(), "key-2");
    }

    #[test]
    fn test_forecast_config_requires_both_keys() {
        let result = ForecastConfig::from_iter(vars(&[("SURFCAST_API_KEY_PRIMARY", "key-1")]));
        assert!(matches!(result, Err(ConfigError::Env { .. })));
    }

    #[test]
    fn test_s3_config() {
        let config = S3Config::from_iter(vars(&[
            ("SURFCAST_S3_ACCESS_KEY_ID", "access"),
            ("SURFCAST_S3_SECRET_ACCESS_KEY", "secret"),
            ("SURFCAST_S3_ENDPOINT", "http://localhost:9000"),
            ("SURFCAST_S3_ALLOW_HTTP", "true"),
        ]))
        .unwrap();

        assert_eq!(config.bucket, "surfline");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(config.allow_http);
    }

    #[test]
    fn test_display_offset() {
        let config = DashboardConfig::from_iter(Vec::new()).unwrap();
        assert_eq!(config.display_offset().unwrap().local_minus_utc(), -3 * 3600);

        let config =
            DashboardConfig::from_iter(vars(&[("SURFCAST_DISPLAY_UTC_OFFSET_HOURS", "30")]))
                .unwrap();
        assert!(matches!(
            config.display_offset(),
            Err(ConfigError::InvalidOffset(30))
        ));
    }
}
