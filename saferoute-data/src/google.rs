//! Wire types shared by the Google web-service responses.

use saferoute_core::Coordinate;
use serde::Deserialize;

/// Status reported when a request succeeded with at least one result.
pub const STATUS_OK: &str = "OK";

/// Status reported when a request succeeded with no results.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Latitude/longitude pair as encoded by Google web services.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Self::new(value.lat, value.lng)
    }
}
