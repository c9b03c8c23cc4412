//! Read side of the daily artifacts: the data behind the forecast dashboard.
//!
//! A [`Dashboard`] loads one day's artifact and turns it into a [`DayView`]. Selecting a place
//! on that view yields a [`PlaceView`] with the wind speed bar chart, the swell height line
//! chart and, for the current day, three summary figures.
//!
//! A missing or unreadable artifact never fails the dashboard; it yields
//! [`DashboardState::Unavailable`].

#[cfg(feature = "plotting")]
pub mod render;

use crate::error::SurfcastError;
use crate::storage::artifact_store::ArtifactStore;
use crate::storage::error::StorageError;
use crate::types::compass::CompassPoint;
use crate::types::forecast_frame::ForecastFrame;
use crate::types::normalized_row::NormalizedRow;
use chrono::{Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use log::{info, warn};

pub const UNAVAILABLE_MESSAGE: &str = "Data not Available. Please select another date";

/// Annotations sit this fraction above their bar.
const ANNOTATION_OFFSET: f64 = 0.1;

/// How far ahead the swell height average looks, inclusive.
const LOOKAHEAD_HOURS: i64 = 3;

pub struct Dashboard {
    store: ArtifactStore,
    display_offset: FixedOffset,
}

impl Dashboard {
    pub fn new(store: ArtifactStore, display_offset: FixedOffset) -> Self {
        Self {
            store,
            display_offset,
        }
    }

    /// Current wall-clock time in the display offset.
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.display_offset).naive_local()
    }

    /// Loads the artifact for `date`.
    pub async fn load(&self, date: NaiveDate) -> DashboardState {
        let frame = match self.store.get_artifact(date).await {
            Ok(frame) => frame,
            Err(StorageError::ArtifactUnavailable { key, .. }) => {
                info!("No artifact '{}' for {}", key, date);
                return DashboardState::Unavailable { date };
            }
            Err(e) => {
                warn!("Failed to load artifact for {}: {}", date, e);
                return DashboardState::Unavailable { date };
            }
        };

        match DayView::new(date, frame, self.display_offset) {
            Ok(view) => DashboardState::Available(view),
            Err(e) => {
                warn!("Artifact for {} is unreadable: {}", date, e);
                DashboardState::Unavailable { date }
            }
        }
    }
}

#[derive(Debug)]
pub enum DashboardState {
    Available(DayView),
    Unavailable { date: NaiveDate },
}

impl DashboardState {
    pub fn is_available(&self) -> bool {
        matches!(self, DashboardState::Available(_))
    }
}

/// Display options chosen by the user.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    /// Label every wind speed bar with its compass direction.
    pub wind_direction_labels: bool,
    /// Wall-clock time in the display offset, used for the summary figures.
    pub now: NaiveDateTime,
}

/// One day's artifact, ready for place selection.
#[derive(Debug)]
pub struct DayView {
    pub date: NaiveDate,
    frame: ForecastFrame,
    places: Vec<String>,
    display_offset: FixedOffset,
}

impl DayView {
    pub fn new(
        date: NaiveDate,
        frame: ForecastFrame,
        display_offset: FixedOffset,
    ) -> Result<Self, SurfcastError> {
        let places = frame.places()?;
        Ok(Self {
            date,
            frame,
            places,
            display_offset,
        })
    }

    /// Distinct places in the artifact, in file order.
    pub fn places(&self) -> &[String] {
        &self.places
    }

    pub fn default_place(&self) -> Option<&str> {
        self.places.first().map(String::as_str)
    }

    /// Builds the charts of one place.
    ///
    /// # Errors
    ///
    /// [`SurfcastError::UnknownPlace`] when `place` is not in [`DayView::places`].
    pub fn select(&self, place: &str, options: &ViewOptions) -> Result<PlaceView, SurfcastError> {
        if !self.places.iter().any(|p| p == place) {
            return Err(SurfcastError::UnknownPlace {
                place: place.to_string(),
                available: self.places.clone(),
            });
        }
        let rows: Vec<DisplayRow> = self
            .frame
            .filter_place(place)?
            .to_rows()?
            .into_iter()
            .map(|row| DisplayRow::new(row, self.display_offset))
            .collect();

        let summary = (options.now.date() == self.date).then(|| Summary::at(&rows, options.now));

        Ok(PlaceView {
            place: place.to_string(),
            wind_speed: wind_speed_chart(&rows, options.wind_direction_labels),
            swell_height: swell_height_chart(&rows),
            summary,
        })
    }
}

/// A row with its timestamp shifted into the display offset.
#[derive(Debug, Clone, PartialEq)]
struct DisplayRow {
    time: NaiveDateTime,
    wind_speed: f64,
    wind_direction: CompassPoint,
    swell_height: f64,
}

impl DisplayRow {
    fn new(row: NormalizedRow, offset: FixedOffset) -> Self {
        Self {
            time: row.time.with_timezone(&offset).naive_local(),
            wind_speed: row.wind_speed,
            wind_direction: row.wind_direction,
            swell_height: row.swell_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub time: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub time: NaiveDateTime,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: &'static str,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
    pub annotations: Vec<Annotation>,
}

/// Everything shown for one place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceView {
    pub place: String,
    pub wind_speed: Chart,
    pub swell_height: Chart,
    /// Only present when the selected date is today.
    pub summary: Option<Summary>,
}

/// Headline figures for the current hour. `None` when the hour is missing from the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// km/h, one decimal.
    pub current_wind_speed: Option<f64>,
    /// m, two decimals.
    pub current_swell_height: Option<f64>,
    /// Mean swell height from the current hour through three hours later, two decimals.
    pub next_hours_swell_height: Option<f64>,
}

impl Summary {
    fn at(rows: &[DisplayRow], now: NaiveDateTime) -> Self {
        let current_hour = truncate_to_hour(now);
        let current = rows.iter().find(|r| r.time == current_hour);

        let lookahead_end = current_hour + Duration::hours(LOOKAHEAD_HOURS);
        let upcoming: Vec<f64> = rows
            .iter()
            .filter(|r| r.time >= current_hour && r.time <= lookahead_end)
            .map(|r| r.swell_height)
            .collect();
        let mean = (!upcoming.is_empty())
            .then(|| upcoming.iter().sum::<f64>() / upcoming.len() as f64);

        Self {
            current_wind_speed: current.map(|r| round_to(r.wind_speed, 1)),
            current_swell_height: current.map(|r| round_to(r.swell_height, 2)),
            next_hours_swell_height: mean.map(|m| round_to(m, 2)),
        }
    }
}

fn wind_speed_chart(rows: &[DisplayRow], with_direction: bool) -> Chart {
    let annotations = if with_direction {
        rows.iter()
            .map(|r| Annotation {
                time: r.time,
                y: r.wind_speed * (1.0 + ANNOTATION_OFFSET),
                text: r.wind_direction.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Chart {
        title: "Wind Speed (km/h)",
        kind: ChartKind::Bar,
        points: rows
            .iter()
            .map(|r| ChartPoint {
                time: r.time,
                value: r.wind_speed,
            })
            .collect(),
        annotations,
    }
}

fn swell_height_chart(rows: &[DisplayRow]) -> Chart {
    Chart {
        title: "Swell Height (m)",
        kind: ChartKind::Line,
        points: rows
            .iter()
            .map(|r| ChartPoint {
                time: r.time,
                value: r.swell_height,
            })
            .collect(),
        annotations: Vec::new(),
    }
}

fn truncate_to_hour(time: NaiveDateTime) -> NaiveDateTime {
    time.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
