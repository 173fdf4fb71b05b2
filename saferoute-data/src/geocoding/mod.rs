//! HTTP geocoding adapter.
//!
//! [`HttpGeocoder`] implements [`saferoute_core::Geocoder`] against the Google
//! Geocoding API. A response with status `ZERO_RESULTS`, or `OK` with an
//! empty result list, maps to [`saferoute_core::GeocodeError::AddressNotFound`].
//! Any other non-`OK` status is reported as a transport-level service error.

mod google;
mod provider;

pub use provider::{DEFAULT_GEOCODE_URL, HttpGeocoder};
