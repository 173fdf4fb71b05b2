//! Orchestrate a safe-route request.
//!
//! [`SafeRouteService`] validates the request, resolves both endpoints,
//! fetches candidate routes and the incident snapshot, scores every candidate
//! and returns the one with the fewest nearby incidents. Any failure ends the
//! request; no partial result is produced.

use std::sync::Arc;

use log::{error, info};
use thiserror::Error;

use crate::{
    Coordinate, CoordinateResolver, GeocodeError, Geocoder, IncidentStore, IncidentStoreError,
    RouteProvider, RouteProviderError, ScoredRoute, SelectionError, TransportError,
    score_candidates, select_safest,
};

/// Errors returned by [`SafeRouteService::compute_safe_route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafeRouteError {
    /// A required query parameter was absent or empty.
    #[error("missing required parameter: {name}")]
    MissingParameter {
        /// Name of the missing parameter.
        name: &'static str,
    },
    /// The geocoder found no match for an address.
    #[error("address not found: {address}")]
    AddressNotFound {
        /// Address that produced no match.
        address: String,
    },
    /// An external geocoding or directions call failed.
    #[error("upstream service failed: {0}")]
    Upstream(#[source] TransportError),
    /// The directions service returned no routes.
    #[error("no routes found")]
    NoRouteFound,
    /// Reading the incident snapshot failed.
    #[error(transparent)]
    StoreRead(#[from] IncidentStoreError),
    /// Selection received no candidates.
    #[error("no candidate routes to select from")]
    EmptyCandidateList,
    /// The background scoring task did not complete.
    #[error("route scoring failed: {message}")]
    Scoring {
        /// Description of the failure.
        message: String,
    },
}

impl SafeRouteError {
    /// HTTP status code used when reporting this error to a client.
    ///
    /// # Examples
    ///
    /// ```
    /// use saferoute_core::SafeRouteError;
    ///
    /// assert_eq!(SafeRouteError::MissingParameter { name: "origin" }.status_code(), 400);
    /// assert_eq!(SafeRouteError::NoRouteFound.status_code(), 404);
    /// assert_eq!(SafeRouteError::EmptyCandidateList.status_code(), 500);
    /// ```
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter { .. } => 400,
            Self::NoRouteFound => 404,
            Self::AddressNotFound { .. }
            | Self::Upstream(_)
            | Self::StoreRead(_)
            | Self::EmptyCandidateList
            | Self::Scoring { .. } => 500,
        }
    }
}

impl From<GeocodeError> for SafeRouteError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::AddressNotFound { address } => Self::AddressNotFound { address },
            GeocodeError::Transport(source) => Self::Upstream(source),
        }
    }
}

impl From<RouteProviderError> for SafeRouteError {
    fn from(err: RouteProviderError) -> Self {
        match err {
            RouteProviderError::NoRouteFound => Self::NoRouteFound,
            RouteProviderError::Transport(source) => Self::Upstream(source),
        }
    }
}

impl From<SelectionError> for SafeRouteError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::EmptyCandidateList => Self::EmptyCandidateList,
            SelectionError::LengthMismatch { .. } => Self::Scoring {
                message: err.to_string(),
            },
        }
    }
}

/// Computes the safest route between two locations.
///
/// The service is cheap to clone and safe to share between concurrent
/// requests. It holds no per-request state.
#[derive(Clone)]
pub struct SafeRouteService {
    resolver: CoordinateResolver<Arc<dyn Geocoder>>,
    routes: Arc<dyn RouteProvider>,
    incidents: Arc<dyn IncidentStore>,
}

impl SafeRouteService {
    /// Assemble a service from its collaborators.
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        routes: Arc<dyn RouteProvider>,
        incidents: Arc<dyn IncidentStore>,
    ) -> Self {
        Self {
            resolver: CoordinateResolver::new(geocoder),
            routes,
            incidents,
        }
    }

    /// Return the candidate route with the fewest incidents nearby.
    ///
    /// `origin` and `destination` may be addresses or literal `"lat,lng"`
    /// pairs. Absent or empty values are rejected before any external call.
    ///
    /// # Errors
    ///
    /// Returns [`SafeRouteError`] describing the first component that failed.
    pub async fn compute_safe_route(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> Result<ScoredRoute, SafeRouteError> {
        let endpoints = required("origin", origin)
            .and_then(|from| required("destination", destination).map(|to| (from, to)));
        let (from, to) = match endpoints {
            Ok(pair) => pair,
            Err(err) => {
                error!("safe route from {origin:?} to {destination:?} rejected: {err}");
                return Err(err);
            }
        };

        match self.run(from, to).await {
            Ok(scored) => {
                info!(
                    "safe route from {from:?} to {to:?} has {} nearby incidents",
                    scored.incident_count
                );
                Ok(scored)
            }
            Err(err) => {
                error!("safe route from {from:?} to {to:?} failed: {err}");
                Err(err)
            }
        }
    }

    async fn run(&self, origin: &str, destination: &str) -> Result<ScoredRoute, SafeRouteError> {
        let (start, end) = tokio::try_join!(self.resolve(origin), self.resolve(destination))?;

        let (candidates, incidents) = tokio::try_join!(
            async {
                self.routes
                    .fetch_routes(start, end)
                    .await
                    .map_err(SafeRouteError::from)
            },
            async { self.incidents.fetch_all().await.map_err(SafeRouteError::from) },
        )?;

        let (scored, scores) = tokio::task::spawn_blocking(move || {
            let counts = score_candidates(&candidates, &incidents);
            (candidates, counts)
        })
        .await
        .map_err(|err| SafeRouteError::Scoring {
            message: err.to_string(),
        })?;

        Ok(select_safest(scored, &scores)?)
    }

    async fn resolve(&self, input: &str) -> Result<Coordinate, SafeRouteError> {
        Ok(self.resolver.resolve(input).await?)
    }
}

fn required<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, SafeRouteError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(SafeRouteError::MissingParameter { name })
}
