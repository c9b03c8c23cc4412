//! Typed model of the point-forecast payload.
//!
//! Every hourly entry maps each requested variable to a set of per-model readings:
//!
//! ```json
//! { "time": "2024-01-01T00:00:00+00:00",
//!   "windSpeed": { "noaa": 4.2, "sg": 4.0, "icon": 4.5 }, ... }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The seven variables requested for every spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    WaveHeight,
    WindSpeed,
    WavePeriod,
    WindDirection,
    SwellHeight,
    SwellPeriod,
    AirTemperature,
}

impl Variable {
    /// In the order they are listed in the request's `params` query parameter.
    pub const ALL: [Variable; 7] = [
        Variable::WaveHeight,
        Variable::WindSpeed,
        Variable::WavePeriod,
        Variable::WindDirection,
        Variable::SwellHeight,
        Variable::SwellPeriod,
        Variable::AirTemperature,
    ];

    /// Name used by the API, both in the query and in the response body.
    pub fn api_name(&self) -> &'static str {
        match self {
            Variable::WaveHeight => "waveHeight",
            Variable::WindSpeed => "windSpeed",
            Variable::WavePeriod => "wavePeriod",
            Variable::WindDirection => "windDirection",
            Variable::SwellHeight => "swellHeight",
            Variable::SwellPeriod => "swellPeriod",
            Variable::AirTemperature => "airTemperature",
        }
    }

    /// Comma separated list for the `params` query parameter.
    pub fn query_list() -> String {
        Self::ALL
            .iter()
            .map(Variable::api_name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Readings of one variable keyed by forecast model name (`noaa`, `sg`, `icon`, ...).
///
/// Models report `null` for hours they do not cover; those readings are kept as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SourceValues(pub HashMap<String, Option<f64>>);

impl SourceValues {
    /// The reading of `source`, or `None` when it is absent or null.
    pub fn get(&self, source: &str) -> Option<f64> {
        self.0.get(source).copied().flatten()
    }
}

impl<const N: usize> From<[(&str, f64); N]> for SourceValues {
    fn from(values: [(&str, f64); N]) -> Self {
        SourceValues(
            values
                .into_iter()
                .map(|(source, value)| (source.to_string(), Some(value)))
                .collect(),
        )
    }
}

/// One hourly entry for one spot.
///
/// A variable missing from the payload deserializes to an empty [`SourceValues`], so the
/// absence surfaces later as a missing-source error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub wave_height: SourceValues,
    #[serde(default)]
    pub wind_speed: SourceValues,
    #[serde(default)]
    pub wave_period: SourceValues,
    #[serde(default)]
    pub wind_direction: SourceValues,
    #[serde(default)]
    pub swell_height: SourceValues,
    #[serde(default)]
    pub swell_period: SourceValues,
    #[serde(default)]
    pub air_temperature: SourceValues,
}

impl RawObservation {
    pub fn values(&self, variable: Variable) -> &SourceValues {
        match variable {
            Variable::WaveHeight => &self.wave_height,
            Variable::WindSpeed => &self.wind_speed,
            Variable::WavePeriod => &self.wave_period,
            Variable::WindDirection => &self.wind_direction,
            Variable::SwellHeight => &self.swell_height,
            Variable::SwellPeriod => &self.swell_period,
            Variable::AirTemperature => &self.air_temperature,
        }
    }
}

/// Request accounting returned alongside the data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub cost: Option<u32>,
    pub daily_quota: Option<u32>,
    pub request_count: Option<u32>,
}

impl ResponseMeta {
    pub fn remaining_requests(&self) -> Option<u32> {
        Some(self.daily_quota?.saturating_sub(self.request_count?))
    }
}

/// Body of a successful point-forecast response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ForecastResponse {
    pub hours: Vec<RawObservation>,
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
}
