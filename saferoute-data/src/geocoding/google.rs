//! Google Geocoding API response types.
//!
//! See: <https://developers.google.com/maps/documentation/geocoding/requests-geocoding>

use serde::Deserialize;

pub use crate::google::{LatLng, STATUS_OK, STATUS_ZERO_RESULTS};

/// Geocoding API response body.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Status code, e.g. `"OK"`, `"ZERO_RESULTS"` or `"REQUEST_DENIED"`.
    pub status: String,

    /// Human-readable detail accompanying a non-`OK` status.
    #[serde(default)]
    pub error_message: Option<String>,

    /// Matches ordered by relevance.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// A single geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Geometry of the match.
    pub geometry: Geometry,
}

/// Geometry block of a geocoding match.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Representative point of the match.
    pub location: LatLng,
}
