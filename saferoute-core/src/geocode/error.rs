use thiserror::Error;

use crate::TransportError;

/// Errors from [`crate::geocode::Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service returned no match for the address.
    #[error("address not found: {address}")]
    AddressNotFound {
        /// Address that produced no match.
        address: String,
    },
    /// The service was unreachable or reported a failure.
    #[error("geocoding request failed: {0}")]
    Transport(#[from] TransportError),
}
