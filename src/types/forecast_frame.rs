//! Contains `ForecastFrame`, the tabular form of a daily artifact.

use crate::types::compass::CompassPoint;
use crate::types::normalized_row::{NormalizedRow, COLUMNS};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::io::Cursor;

/// Timestamp layout of the `time` column, e.g. `2024-01-01 03:00:00+00:00`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// A wrapper around a Polars `DataFrame` holding [`NormalizedRow`]s.
///
/// `time` is stored as text in [`TIME_FORMAT`] and `wind_direction` as its compass label, so
/// the CSV written by [`ForecastFrame::to_csv_bytes`] reads the same in any CSV tool.
#[derive(Debug, Clone)]
pub struct ForecastFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl ForecastFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Builds a frame from rows, preserving their order.
    pub fn from_rows(rows: &[NormalizedRow]) -> PolarsResult<Self> {
        let frame = df!(
            "time" => rows.iter().map(|r| r.time.format(TIME_FORMAT).to_string()).collect::<Vec<_>>(),
            "place" => rows.iter().map(|r| r.place.clone()).collect::<Vec<_>>(),
            "air_temperature" => rows.iter().map(|r| r.air_temperature).collect::<Vec<_>>(),
            "swell_height" => rows.iter().map(|r| r.swell_height).collect::<Vec<_>>(),
            "swell_period" => rows.iter().map(|r| r.swell_period).collect::<Vec<_>>(),
            "wave_height" => rows.iter().map(|r| r.wave_height).collect::<Vec<_>>(),
            "wave_period" => rows.iter().map(|r| r.wave_period).collect::<Vec<_>>(),
            "wind_direction" => rows.iter().map(|r| r.wind_direction.as_str()).collect::<Vec<_>>(),
            "wind_speed" => rows.iter().map(|r| r.wind_speed).collect::<Vec<_>>()
        )?;
        Ok(Self::new(frame))
    }

    /// Parses a CSV artifact (header row, comma separated).
    ///
    /// Columns come back in [`COLUMNS`] order; a missing column is an error, extra ones are dropped.
    pub fn from_csv_bytes(bytes: Vec<u8>) -> PolarsResult<Self> {
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?
            .select(COLUMNS)?;
        Ok(Self::new(frame))
    }

    /// Serializes to CSV with a header row and no index column.
    pub fn to_csv_bytes(&mut self) -> PolarsResult<Vec<u8>> {
        let mut buffer = Vec::new();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut self.frame)?;
        Ok(buffer)
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Distinct `place` values in order of first appearance.
    pub fn places(&self) -> PolarsResult<Vec<String>> {
        let column = self.frame.column("place")?.cast(&DataType::String)?;
        let mut places: Vec<String> = Vec::new();
        for place in column.str()?.into_iter().flatten() {
            if !places.iter().any(|p| p == place) {
                places.push(place.to_string());
            }
        }
        Ok(places)
    }

    /// Keeps only the rows of one place.
    pub fn filter_place(&self, place: &str) -> PolarsResult<ForecastFrame> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(col("place").eq(lit(place)))
            .collect()?;
        Ok(Self::new(frame))
    }

    /// Converts the frame back into typed rows. Fails on nulls or unparseable values.
    pub fn to_rows(&self) -> PolarsResult<Vec<NormalizedRow>> {
        let times = string_column(&self.frame, "time")?;
        let places = string_column(&self.frame, "place")?;
        let air_temperature = f64_column(&self.frame, "air_temperature")?;
        let swell_height = f64_column(&self.frame, "swell_height")?;
        let swell_period = f64_column(&self.frame, "swell_period")?;
        let wave_height = f64_column(&self.frame, "wave_height")?;
        let wave_period = f64_column(&self.frame, "wave_period")?;
        let wind_direction = string_column(&self.frame, "wind_direction")?;
        let wind_speed = f64_column(&self.frame, "wind_speed")?;

        (0..self.frame.height())
            .map(|i| {
                let time = required(&times[i], "time", i)?;
                let direction = required(&wind_direction[i], "wind_direction", i)?;
                Ok(NormalizedRow {
                    time: parse_time(time)?,
                    place: required(&places[i], "place", i)?.clone(),
                    air_temperature: *required(&air_temperature[i], "air_temperature", i)?,
                    swell_height: *required(&swell_height[i], "swell_height", i)?,
                    swell_period: *required(&swell_period[i], "swell_period", i)?,
                    wave_height: *required(&wave_height[i], "wave_height", i)?,
                    wave_period: *required(&wave_period[i], "wave_period", i)?,
                    wind_direction: direction.parse::<CompassPoint>().map_err(|e| {
                        PolarsError::ComputeError(format!("row {}: {}", i, e).into())
                    })?,
                    wind_speed: *required(&wind_speed[i], "wind_speed", i)?,
                })
            })
            .collect()
    }
}

fn f64_column(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    // Whole-number columns are inferred as integers when read back from CSV
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

fn string_column(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = frame.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

fn required<'a, T>(value: &'a Option<T>, column: &str, row: usize) -> PolarsResult<&'a T> {
    value.as_ref().ok_or_else(|| {
        PolarsError::ComputeError(format!("null value in column '{}' at row {}", column, row).into())
    })
}

fn parse_time(value: &str) -> PolarsResult<DateTime<Utc>> {
    DateTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PolarsError::ComputeError(format!("invalid time '{}': {}", value, e).into()))
}
