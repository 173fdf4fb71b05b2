//! Facade crate for the safe-route engine.
//!
//! This crate re-exports the core domain types and, behind the `adapters`
//! feature, the Google web-service adapters and the SQLite incident store.

#![forbid(unsafe_code)]

pub use saferoute_core::{
    Coordinate, CoordinateResolver, EARTH_RADIUS_KM, GeocodeError, Geocoder, IncidentIndex,
    IncidentRecord, IncidentReport, IncidentSink, IncidentStore, IncidentStoreError, NewIncident,
    PROXIMITY_THRESHOLD_KM, RouteCandidate, RouteLeg, RouteProvider, RouteProviderError,
    RouteStep, SafeRouteError, SafeRouteService, ScoredRoute, SelectionError, TransportError,
    haversine_km, score_candidates, score_route, select_safest,
};

#[cfg(feature = "adapters")]
pub use saferoute_data::{
    HttpGeocoder, HttpRouteProvider, HttpServiceConfig, ProviderBuildError, SqliteIncidentStore,
    SqliteIncidentStoreError,
};
