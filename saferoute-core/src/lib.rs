//! Core domain types for the safe-route engine.
//!
//! The crate ranks candidate routes between two points by how much of their
//! travel passes close to recorded incidents. It owns the pure parts of the
//! pipeline (geodesy, scoring, selection) and the orchestration that ties the
//! external collaborators together. I/O lives behind the [`Geocoder`],
//! [`RouteProvider`] and [`IncidentStore`] traits so adapters can be swapped
//! without touching the algorithm.

#![forbid(unsafe_code)]

pub mod coordinate;
pub mod directions;
pub mod geocode;
pub mod geodesy;
pub mod incident;
pub mod resolver;
pub mod route;
pub mod scorer;
pub mod selector;
pub mod service;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;
pub mod transport;

pub use coordinate::Coordinate;
pub use directions::{RouteProvider, RouteProviderError};
pub use geocode::{GeocodeError, Geocoder};
pub use geodesy::{EARTH_RADIUS_KM, PROXIMITY_THRESHOLD_KM, haversine_km};
pub use incident::{IncidentRecord, IncidentReport, NewIncident};
pub use resolver::CoordinateResolver;
pub use route::{RouteCandidate, RouteLeg, RouteStep, ScoredRoute};
pub use scorer::{IncidentIndex, score_candidates, score_route};
pub use selector::{SelectionError, select_safest};
pub use service::{SafeRouteError, SafeRouteService};
pub use store::{IncidentSink, IncidentStore, IncidentStoreError};
pub use transport::TransportError;
