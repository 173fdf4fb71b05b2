//! Geographic coordinates and literal `"lat,lng"` parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
///
/// No range validation is applied: latitudes outside `[-90, 90]` and
/// longitudes outside `[-180, 180]` are carried through unchanged.
///
/// # Examples
///
/// ```
/// use saferoute_core::Coordinate;
///
/// let coordinate = Coordinate::new(51.5, -0.12);
/// assert_eq!(coordinate.to_string(), "51.5,-0.12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a literal `"lat,lng"` pair.
    ///
    /// Returns `None` unless the input holds exactly one comma separating two
    /// finite numeric tokens. Whitespace around each token is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use saferoute_core::Coordinate;
    ///
    /// assert_eq!(
    ///     Coordinate::parse_literal("1.0, 2.5"),
    ///     Some(Coordinate::new(1.0, 2.5))
    /// );
    /// assert_eq!(Coordinate::parse_literal("10 Downing St, London"), None);
    /// assert_eq!(Coordinate::parse_literal("1,2,3"), None);
    /// ```
    #[must_use]
    pub fn parse_literal(input: &str) -> Option<Self> {
        let (latitude, longitude) = input.split_once(',')?;
        if longitude.contains(',') {
            return None;
        }
        Some(Self::new(
            parse_component(latitude)?,
            parse_component(longitude)?,
        ))
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

fn parse_component(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0,1.0", 1.0, 1.0)]
    #[case("-33.8688,151.2093", -33.8688, 151.2093)]
    #[case(" 40.7 , -74.0 ", 40.7, -74.0)]
    #[case("95,200", 95.0, 200.0)]
    fn parses_numeric_pairs(#[case] input: &str, #[case] latitude: f64, #[case] longitude: f64) {
        assert_eq!(
            Coordinate::parse_literal(input),
            Some(Coordinate::new(latitude, longitude))
        );
    }

    #[rstest]
    #[case("Trafalgar Square")]
    #[case("221B Baker Street, London")]
    #[case("1.0,")]
    #[case(",1.0")]
    #[case("1.0,2.0,3.0")]
    #[case("NaN,1.0")]
    #[case("1.0,inf")]
    #[case("")]
    fn rejects_non_literal_input(#[case] input: &str) {
        assert_eq!(Coordinate::parse_literal(input), None);
    }

    #[rstest]
    fn display_round_trips_through_literal_parsing() {
        let coordinate = Coordinate::new(48.8566, 2.3522);
        let rendered = coordinate.to_string();
        assert_eq!(rendered, "48.8566,2.3522");
        assert_eq!(Coordinate::parse_literal(&rendered), Some(coordinate));
    }

    #[rstest]
    #[case(Coordinate::new(f64::NAN, 0.0), false)]
    #[case(Coordinate::new(0.0, f64::INFINITY), false)]
    #[case(Coordinate::new(120.0, -500.0), true)]
    fn reports_finiteness(#[case] coordinate: Coordinate, #[case] expected: bool) {
        assert_eq!(coordinate.is_finite(), expected);
    }
}
