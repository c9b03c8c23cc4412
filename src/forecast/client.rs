//! HTTP access to the point-forecast API.

use crate::forecast::error::ForecastError;
use crate::types::credential::ApiKey;
use crate::types::day_window::DayWindow;
use crate::types::location::Location;
use crate::types::raw_observation::{ForecastResponse, Variable};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.stormglass.io/v2/weather/point";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status the provider answers with once the key's quota is used up.
pub const QUOTA_EXCEEDED: StatusCode = StatusCode::PAYMENT_REQUIRED;

/// Anything that can produce the hourly readings of one place for one day.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(
        &self,
        location: &Location,
        window: &DayWindow,
        key: &ApiKey,
    ) -> Result<ForecastResponse, ForecastError>;
}

/// Client for the Stormglass point-forecast endpoint.
#[derive(Debug, Clone)]
pub struct StormglassClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl StormglassClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ForecastError::ClientBuild)?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn with_defaults() -> Result<Self, ForecastError> {
        Self::new(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }

    fn query(location: &Location, window: &DayWindow) -> Vec<(&'static str, String)> {
        vec![
            ("lat", location.coordinates.latitude().to_string()),
            ("lng", location.coordinates.longitude().to_string()),
            ("params", Variable::query_list()),
            ("start", window.start_epoch().to_string()),
            ("end", window.end_epoch().to_string()),
        ]
    }

    fn map_send_error(&self, e: reqwest::Error) -> ForecastError {
        if e.is_timeout() {
            ForecastError::NetworkTimeout {
                url: self.url.clone(),
                timeout: self.timeout,
                source: e,
            }
        } else {
            ForecastError::NetworkRequest(self.url.clone(), e)
        }
    }
}

/// Maps a non-success status to its error. Returns `None` for 2xx.
pub fn classify_status(status: StatusCode, url: &str, location: &str) -> Option<ForecastError> {
    if status.is_success() {
        None
    } else if status == QUOTA_EXCEEDED {
        Some(ForecastError::ApiLimitReached {
            location: location.to_string(),
        })
    } else {
        Some(ForecastError::HttpStatus {
            url: url.to_string(),
            status,
        })
    }
}

#[async_trait]
impl ForecastSource for StormglassClient {
    async fn fetch(
        &self,
        location: &Location,
        window: &DayWindow,
        key: &ApiKey,
    ) -> Result<ForecastResponse, ForecastError> {
        debug!("Requesting {} for {}", location, window);

        let response = self
            .client
            .get(&self.url)
            .query(&Self::query(location, window))
            .header(AUTHORIZATION, key.expose())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if let Some(err) = classify_status(response.status(), &self.url, &location.name) {
            warn!(
                "Forecast request for '{}' failed with status {}",
                location.name,
                response.status()
            );
            return Err(err);
        }

        let body: ForecastResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                ForecastError::ResponseParse(self.url.clone(), e)
            }
        })?;

        info!(
            "Fetched {} hours for '{}'{}",
            body.hours.len(),
            location.name,
            body.meta
                .as_ref()
                .and_then(|m| m.remaining_requests())
                .map(|left| format!(" ({} requests left today)", left))
                .unwrap_or_default()
        );
        Ok(body)
    }
}
