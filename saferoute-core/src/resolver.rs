//! Turn user-supplied location strings into coordinates.

use log::debug;

use crate::{Coordinate, GeocodeError, Geocoder};

/// Resolves location strings, bypassing the geocoder for literal pairs.
///
/// Input that parses as `"lat,lng"` (see [`Coordinate::parse_literal`]) is
/// returned directly. Anything else is forwarded to the wrapped geocoder and
/// its errors are propagated unchanged.
///
/// # Examples
///
/// ```rust
/// # tokio::runtime::Builder::new_current_thread()
/// #     .enable_all()
/// #     .build()
/// #     .expect("runtime")
/// #     .block_on(async {
/// use saferoute_core::{Coordinate, CoordinateResolver};
/// use saferoute_core::test_support::StubGeocoder;
///
/// let resolver = CoordinateResolver::new(StubGeocoder::default());
/// let coordinate = resolver.resolve("51.5,-0.12").await.expect("literal");
/// assert_eq!(coordinate, Coordinate::new(51.5, -0.12));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct CoordinateResolver<G> {
    geocoder: G,
}

impl<G> CoordinateResolver<G>
where
    G: Geocoder,
{
    /// Wrap `geocoder`.
    pub const fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Borrow the wrapped geocoder.
    pub const fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Resolve `input` to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns whatever the geocoder reports when `input` is not a literal
    /// coordinate pair.
    pub async fn resolve(&self, input: &str) -> Result<Coordinate, GeocodeError> {
        if let Some(coordinate) = Coordinate::parse_literal(input) {
            debug!("treating {input:?} as a literal coordinate");
            return Ok(coordinate);
        }
        debug!("geocoding {input:?}");
        self.geocoder.geocode(input).await
    }
}
