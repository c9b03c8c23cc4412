//! Conversion from a continuous bearing in degrees to one of eight compass points.

use std::fmt;
use std::str::FromStr;

/// One of the eight cardinal and intercardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

/// Lookup table indexed by `floor((degrees + 22.5) / 45)`.
///
/// The ninth entry repeats `N` so bearings in `[337.5, 360)` wrap back to north.
const DIRECTIONS: [CompassPoint; 9] = [
    CompassPoint::N,
    CompassPoint::NE,
    CompassPoint::E,
    CompassPoint::SE,
    CompassPoint::S,
    CompassPoint::SW,
    CompassPoint::W,
    CompassPoint::NW,
    CompassPoint::N,
];

impl CompassPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the eight compass labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a compass point")]
pub struct ParseCompassPointError(pub String);

impl FromStr for CompassPoint {
    type Err = ParseCompassPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(CompassPoint::N),
            "NE" => Ok(CompassPoint::NE),
            "E" => Ok(CompassPoint::E),
            "SE" => Ok(CompassPoint::SE),
            "S" => Ok(CompassPoint::S),
            "SW" => Ok(CompassPoint::SW),
            "W" => Ok(CompassPoint::W),
            "NW" => Ok(CompassPoint::NW),
            other => Err(ParseCompassPointError(other.to_string())),
        }
    }
}

/// Converts a bearing in degrees to a compass point.
///
/// The bearing is first normalized into `[0, 360)`, so `360.0`, `-90.0` or `450.0` are
/// accepted. The sector boundaries belong to the clockwise neighbour: `22.5` is `NE`,
/// `67.5` is `E`, and `337.5` is `N`.
///
/// Non-finite input (NaN, infinities) maps to `N`.
///
/// # Examples
///
/// ```
/// use surfcast::{degrees_to_compass, CompassPoint};
///
/// assert_eq!(degrees_to_compass(0.0), CompassPoint::N);
/// assert_eq!(degrees_to_compass(90.0), CompassPoint::E);
/// assert_eq!(degrees_to_compass(359.0), CompassPoint::N);
/// ```
pub fn degrees_to_compass(degrees: f64) -> CompassPoint {
    if !degrees.is_finite() {
        return CompassPoint::N;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    let index = ((normalized + 22.5) / 45.0).floor() as usize;
    DIRECTIONS[index.min(DIRECTIONS.len() - 1)]
}
