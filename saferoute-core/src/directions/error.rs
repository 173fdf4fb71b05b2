use thiserror::Error;

use crate::TransportError;

/// Errors from [`crate::directions::RouteProvider::fetch_routes`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteProviderError {
    /// The service returned an empty route list.
    #[error("no routes found between the requested points")]
    NoRouteFound,
    /// The service was unreachable or reported a failure.
    #[error("directions request failed: {0}")]
    Transport(#[from] TransportError),
}
