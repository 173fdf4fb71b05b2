//! Geocoder trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Coordinate;

use super::error::GeocodeError;

/// Look up the coordinate of a free-text address.
///
/// Implementations issue one outbound call per lookup and must not memoise
/// results. They must be `Send + Sync` so a single instance can serve
/// concurrent requests.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use saferoute_core::{Coordinate, GeocodeError, Geocoder};
///
/// struct FixedGeocoder;
///
/// #[async_trait]
/// impl Geocoder for FixedGeocoder {
///     async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
///         if address.is_empty() {
///             return Err(GeocodeError::AddressNotFound {
///                 address: address.to_owned(),
///             });
///         }
///         Ok(Coordinate::new(51.5, -0.12))
///     }
/// }
/// ```
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Return the best match for `address`.
    ///
    /// Implementations must return [`GeocodeError::AddressNotFound`] when the
    /// service yields zero matches.
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

#[async_trait]
impl<T> Geocoder for Arc<T>
where
    T: Geocoder + ?Sized,
{
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        (**self).geocode(address).await
    }
}
