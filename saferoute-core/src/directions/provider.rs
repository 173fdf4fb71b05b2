//! Route provider trait.

use async_trait::async_trait;

use crate::{Coordinate, RouteCandidate};

use super::error::RouteProviderError;

/// Retrieve alternative routes between two coordinates.
///
/// Implementations request every alternative the service offers and return
/// them in the order the service supplied them.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use saferoute_core::{
///     Coordinate, RouteCandidate, RouteLeg, RouteProvider, RouteProviderError, RouteStep,
/// };
///
/// struct DirectProvider;
///
/// #[async_trait]
/// impl RouteProvider for DirectProvider {
///     async fn fetch_routes(
///         &self,
///         origin: Coordinate,
///         destination: Coordinate,
///     ) -> Result<Vec<RouteCandidate>, RouteProviderError> {
///         let leg = RouteLeg::new(vec![RouteStep::new(origin, destination)]);
///         Ok(vec![RouteCandidate::new(vec![leg], serde_json::Value::Null)])
///     }
/// }
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Return the candidate routes from `origin` to `destination`.
    ///
    /// Implementations must return [`RouteProviderError::NoRouteFound`] rather
    /// than an empty list.
    async fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError>;
}

