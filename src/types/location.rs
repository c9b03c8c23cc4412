//! The fixed set of surf spots the pipeline fetches forecasts for.

use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use surfcast::LatLon;
///
/// let geriba = LatLon(-22.7788, -41.9107);
/// assert_eq!(geriba.0, -22.7788); // Latitude
/// assert_eq!(geriba.1, -41.9107); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }
}

/// A named forecast point. The name is the unique key and ends up in the `place` column.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinates: LatLon,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: LatLon) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.4}, {:.4})",
            self.name, self.coordinates.0, self.coordinates.1
        )
    }
}

/// The five configured spots, in the order their rows appear in a daily artifact.
///
/// Joaquina shares Itaúna's coordinates; that is how the spot list has always been
/// configured, so the two places report identical numbers.
pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new(
            "Canto das Pedras - Açu",
            LatLon(-21.84931242362662, -40.995046258708484),
        ),
        Location::new(
            "Praia de Itaúna - Saquarema",
            LatLon(-22.935712293847164, -42.48337101071781),
        ),
        Location::new(
            "Praia de Grussaí - São João da Barra",
            LatLon(-21.69321525422544, -41.02351641556605),
        ),
        Location::new(
            "Praia de Geribá - Búzios",
            LatLon(-22.778805307418207, -41.910794828528886),
        ),
        Location::new(
            "Praia de Joaquina - Florianópolis",
            LatLon(-22.935712293847164, -42.48337101071781),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_locations_have_unique_names() {
        let locations = default_locations();
        assert_eq!(locations.len(), 5);

        let names: HashSet<&str> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names.len(), locations.len(), "location names must be unique");
    }

    #[test]
    fn test_default_locations_are_in_southern_hemisphere() {
        for location in default_locations() {
            assert!(location.coordinates.latitude() < 0.0, "{}", location);
            assert!(location.coordinates.longitude() < 0.0, "{}", location);
        }
    }
}
