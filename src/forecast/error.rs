use crate::types::raw_observation::Variable;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    /// The active key has used up its request allowance (HTTP 402).
    #[error("API request quota exhausted while fetching '{location}'")]
    ApiLimitReached { location: String },

    #[error("No '{source_name}' reading for {variable} at {time} for '{location}'")]
    MissingSource {
        location: String,
        variable: Variable,
        source_name: String,
        time: DateTime<Utc>,
    },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Request to {url} timed out after {timeout:?}")]
    NetworkTimeout {
        url: String,
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode forecast response from {0}")]
    ResponseParse(String, #[source] reqwest::Error),
}

impl ForecastError {
    pub fn is_api_limit(&self) -> bool {
        matches!(self, ForecastError::ApiLimitReached { .. })
    }
}
