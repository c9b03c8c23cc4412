use crate::config::ConfigError;
use crate::forecast::error::ForecastError;
use crate::storage::error::StorageError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfcastError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),

    #[error("Could not resolve the day window for {0}")]
    DateParsing(NaiveDate),

    #[error("Unknown place '{place}'. Available: {}", .available.join(", "))]
    UnknownPlace {
        place: String,
        available: Vec<String>,
    },
}

impl SurfcastError {
    /// True when the error is a quota exhaustion of the active API key.
    pub fn is_api_limit(&self) -> bool {
        matches!(self, SurfcastError::Forecast(e) if e.is_api_limit())
    }
}
