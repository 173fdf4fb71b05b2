//! Great-circle distance helpers.

use crate::Coordinate;

/// Mean Earth radius used for every distance computation, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance below which an incident counts as near a route step, in kilometres.
pub const PROXIMITY_THRESHOLD_KM: f64 = 0.5;

/// Haversine great-circle distance between two coordinates, in kilometres.
///
/// Non-finite input yields `NaN`, which never compares below any threshold.
///
/// # Examples
///
/// ```
/// use saferoute_core::{Coordinate, haversine_km};
///
/// let nashville = Coordinate::new(36.12, -86.67);
/// let los_angeles = Coordinate::new(33.94, -118.40);
/// let distance = haversine_km(nashville, los_angeles);
/// assert!((distance - 2886.4).abs() < 1.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine formula is defined over floating-point trigonometry"
)]
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Whether `from` lies strictly closer than [`PROXIMITY_THRESHOLD_KM`] to `to`.
#[must_use]
pub fn within_threshold(from: Coordinate, to: Coordinate) -> bool {
    haversine_km(from, to) < PROXIMITY_THRESHOLD_KM
}
