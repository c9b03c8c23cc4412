//! Flattens per-model readings into one [`NormalizedRow`] per hour.

use crate::forecast::error::ForecastError;
use crate::types::compass::degrees_to_compass;
use crate::types::normalized_row::NormalizedRow;
use crate::types::raw_observation::{RawObservation, Variable};

/// The only forecast model whose readings are kept.
pub const NOAA_SOURCE: &str = "noaa";

/// m/s to km/h.
pub const MS_TO_KMH: f64 = 3.6;

/// Transforms the hourly readings of one place into normalized rows, one per input hour.
///
/// Wind speed is converted to km/h and wind direction to a compass point; every other
/// variable is copied as reported by [`NOAA_SOURCE`].
///
/// # Errors
///
/// Returns [`ForecastError::MissingSource`] for the first hour and variable that has no
/// NOAA reading. No rows are returned in that case.
pub fn transform_observations(
    hours: &[RawObservation],
    place: &str,
) -> Result<Vec<NormalizedRow>, ForecastError> {
    hours
        .iter()
        .map(|hour| transform_observation(hour, place))
        .collect()
}

pub fn transform_observation(
    hour: &RawObservation,
    place: &str,
) -> Result<NormalizedRow, ForecastError> {
    let noaa = |variable: Variable| -> Result<f64, ForecastError> {
        hour.values(variable)
            .get(NOAA_SOURCE)
            .ok_or_else(|| ForecastError::MissingSource {
                location: place.to_string(),
                variable,
                source_name: NOAA_SOURCE.to_string(),
                time: hour.time,
            })
    };

    Ok(NormalizedRow {
        time: hour.time,
        place: place.to_string(),
        air_temperature: noaa(Variable::AirTemperature)?,
        swell_height: noaa(Variable::SwellHeight)?,
        swell_period: noaa(Variable::SwellPeriod)?,
        wave_height: noaa(Variable::WaveHeight)?,
        wave_period: noaa(Variable::WavePeriod)?,
        wind_direction: degrees_to_compass(noaa(Variable::WindDirection)?),
        wind_speed: noaa(Variable::WindSpeed)? * MS_TO_KMH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::compass::CompassPoint;
    use crate::types::raw_observation::SourceValues;
    use chrono::{TimeZone, Utc};

    fn observation(hour: u32, wind_speed: f64, wind_direction: f64) -> RawObservation {
        RawObservation {
            time: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            wave_height: SourceValues::from([("noaa", 1.4), ("sg", 1.3)]),
            wind_speed: SourceValues::from([("noaa", wind_speed), ("sg", 99.0)]),
            wave_period: SourceValues::from([("noaa", 7.5)]),
            wind_direction: SourceValues::from([("noaa", wind_direction)]),
            swell_height: SourceValues::from([("noaa", 1.1)]),
            swell_period: SourceValues::from([("noaa", 11.0)]),
            air_temperature: SourceValues::from([("noaa", 26.3), ("icon", 25.0)]),
        }
    }

    #[test]
    fn test_wind_speed_is_converted_to_kmh() {
        let row = transform_observation(&observation(0, 10.0, 0.0), "Geribá").unwrap();
        assert!((row.wind_speed - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_wind_speed_converts_back_to_ms() {
        for speed in [0.0, 0.35, 4.2, 12.75, 31.0] {
            let row = transform_observation(&observation(0, speed, 0.0), "Geribá").unwrap();
            assert!((row.wind_speed / MS_TO_KMH - speed).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wind_direction_labels() {
        let direction = |degrees| {
            transform_observation(&observation(0, 1.0, degrees), "Geribá")
                .unwrap()
                .wind_direction
        };
        assert_eq!(direction(0.0), CompassPoint::N);
        assert_eq!(direction(359.0), CompassPoint::N);
        assert_eq!(direction(90.0), CompassPoint::E);
    }

    #[test]
    fn test_copies_noaa_values_and_place() {
        let row = transform_observation(&observation(5, 2.0, 200.0), "Açu").unwrap();
        assert_eq!(row.place, "Açu");
        assert_eq!(row.time, Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap());
        assert_eq!(row.air_temperature, 26.3);
        assert_eq!(row.swell_height, 1.1);
        assert_eq!(row.swell_period, 11.0);
        assert_eq!(row.wave_height, 1.4);
        assert_eq!(row.wave_period, 7.5);
        assert_eq!(row.wind_direction, CompassPoint::S);
    }

    #[test]
    fn test_one_row_per_hour() {
        let hours: Vec<_> = (0..24).map(|h| observation(h, 3.0, 45.0)).collect();
        let rows = transform_observations(&hours, "Itaúna").unwrap();
        assert_eq!(rows.len(), 24);
        assert!(rows.iter().zip(&hours).all(|(r, h)| r.time == h.time));
    }

    #[test]
    fn test_missing_noaa_source_fails() {
        let mut hour = observation(7, 3.0, 45.0);
        hour.swell_period = SourceValues::from([("sg", 10.0)]);

        let err = transform_observations(&[observation(6, 3.0, 45.0), hour], "Itaúna")
            .unwrap_err();
        match err {
            ForecastError::MissingSource {
                variable,
                source_name,
                time,
                ..
            } => {
                assert_eq!(variable, Variable::SwellPeriod);
                assert_eq!(source_name, NOAA_SOURCE);
                assert_eq!(time, Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_noaa_reading_is_missing() {
        let mut hour = observation(9, 3.0, 45.0);
        hour.wind_speed.0.insert(NOAA_SOURCE.to_string(), None);

        let err = transform_observation(&hour, "Geribá").unwrap_err();
        assert!(matches!(
            err,
            ForecastError::MissingSource {
                variable: Variable::WindSpeed,
                ..
            }
        ));
    }

    #[test]
    fn test_null_from_other_source_is_ignored() {
        let mut hour = observation(9, 3.0, 45.0);
        hour.swell_height.0.insert("meteo".to_string(), None);

        let row = transform_observation(&hour, "Geribá").unwrap();
        assert_eq!(row.swell_height, 1.1);
    }
}
