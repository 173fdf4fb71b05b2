//! Resolve free-text addresses into coordinates.
//!
//! The `Geocoder` trait abstracts an external geocoding service. Callers
//! supply an address and receive the best matching [`Coordinate`](crate::Coordinate).

mod error;
mod provider;

pub use error::GeocodeError;
pub use provider::Geocoder;
