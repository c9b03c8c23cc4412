mod config;
mod dashboard;
mod error;
mod forecast;
mod pipeline;
mod storage;
mod types;

pub use error::SurfcastError;
pub use pipeline::*;

pub use config::{ConfigError, DashboardConfig, ForecastConfig, S3Config};

pub use forecast::client::{classify_status, ForecastSource, StormglassClient, DEFAULT_API_URL};
pub use forecast::error::ForecastError;
pub use forecast::transform::{transform_observation, transform_observations, MS_TO_KMH, NOAA_SOURCE};

pub use storage::artifact_store::ArtifactStore;
pub use storage::error::StorageError;

pub use dashboard::{
    Annotation, Chart, ChartKind, ChartPoint, Dashboard, DashboardState, DayView, PlaceView,
    Summary, ViewOptions, UNAVAILABLE_MESSAGE,
};
#[cfg(feature = "plotting")]
pub use dashboard::render::render;

pub use types::compass::{degrees_to_compass, CompassPoint, ParseCompassPointError};
pub use types::credential::{ActiveCredential, ApiKey, Credentials};
pub use types::day_window::{artifact_key, DayWindow};
pub use types::forecast_frame::ForecastFrame;
pub use types::location::{default_locations, LatLon, Location};
pub use types::normalized_row::NormalizedRow;
pub use types::raw_observation::{
    ForecastResponse, RawObservation, ResponseMeta, SourceValues, Variable,
};
