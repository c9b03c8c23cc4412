use crate::types::compass::CompassPoint;
use chrono::{DateTime, Utc};

/// Column names of a daily artifact, in file order.
pub const COLUMNS: [&str; 9] = [
    "time",
    "place",
    "air_temperature",
    "swell_height",
    "swell_period",
    "wave_height",
    "wave_period",
    "wind_direction",
    "wind_speed",
];

/// One hour of forecast for one place, flattened to plain columns.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub time: DateTime<Utc>,
    pub place: String,
    /// °C
    pub air_temperature: f64,
    /// m
    pub swell_height: f64,
    /// s
    pub swell_period: f64,
    /// m
    pub wave_height: f64,
    /// s
    pub wave_period: f64,
    pub wind_direction: CompassPoint,
    /// km/h
    pub wind_speed: f64,
}
