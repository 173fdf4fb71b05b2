//! In-memory collaborators used by unit and behaviour tests.
//!
//! Compiled for this crate's own tests and for dependants that enable the
//! `test-support` feature.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use crate::{
    Coordinate, GeocodeError, Geocoder, IncidentRecord, IncidentReport, IncidentSink, IncidentStore,
    IncidentStoreError, NewIncident, RouteCandidate, RouteLeg, RouteProvider, RouteProviderError,
    RouteStep, TransportError,
};

/// Timestamp stamped on incidents recorded by [`MemoryIncidentStore`].
pub const MEMORY_RECORDED_AT: &str = "1970-01-01T00:00:00.000Z";

/// Drive `future` to completion on a fresh single-threaded runtime.
#[expect(clippy::expect_used, reason = "test helper; runtime construction is infallible in tests")]
pub fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build Tokio runtime")
        .block_on(future)
}

/// Incident report at the given position with a placeholder category.
#[must_use]
pub fn incident_at(id: i64, latitude: f64, longitude: f64) -> IncidentReport {
    IncidentReport {
        id,
        latitude,
        longitude,
        category: "test".to_owned(),
        recorded_at: MEMORY_RECORDED_AT.to_owned(),
    }
}

/// Single-leg route visiting `points` in order, with a null payload.
#[must_use]
pub fn route_through(points: &[Coordinate]) -> RouteCandidate {
    let steps = points
        .windows(2)
        .filter_map(|pair| match pair {
            [start, end] => Some(RouteStep::new(*start, *end)),
            _ => None,
        })
        .collect();
    RouteCandidate::new(vec![RouteLeg::new(steps)], serde_json::Value::Null)
}

/// Like [`route_through`] but with a `{"summary": name}` payload so tests can
/// tell candidates apart.
#[must_use]
pub fn named_route(name: &str, points: &[Coordinate]) -> RouteCandidate {
    let mut route = route_through(points);
    route.raw = json!({ "summary": name });
    route
}

/// `Geocoder` backed by a fixed address table.
///
/// Unknown addresses produce [`GeocodeError::AddressNotFound`]. Every lookup
/// is counted.
#[derive(Debug, Default)]
pub struct StubGeocoder {
    addresses: HashMap<String, Coordinate>,
    failure: Option<TransportError>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    /// Add an address to the table.
    #[must_use]
    pub fn with_address(mut self, address: &str, coordinate: Coordinate) -> Self {
        self.addresses.insert(address.to_owned(), coordinate);
        self
    }

    /// Geocoder whose every lookup fails with `error`.
    #[must_use]
    pub fn failing(error: TransportError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Number of lookups performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.failure {
            return Err(GeocodeError::Transport(error.clone()));
        }
        self.addresses
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::AddressNotFound {
                address: address.to_owned(),
            })
    }
}

/// `RouteProvider` returning a fixed candidate list.
///
/// An empty list produces [`RouteProviderError::NoRouteFound`].
#[derive(Debug, Default)]
pub struct StubRouteProvider {
    routes: Vec<RouteCandidate>,
    failure: Option<TransportError>,
    requests: Mutex<Vec<(Coordinate, Coordinate)>>,
}

impl StubRouteProvider {
    /// Provider that always returns `routes`.
    #[must_use]
    pub fn with_routes(routes: Vec<RouteCandidate>) -> Self {
        Self {
            routes,
            ..Self::default()
        }
    }

    /// Provider whose every request fails with `error`.
    #[must_use]
    pub fn failing(error: TransportError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Origin and destination of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<(Coordinate, Coordinate)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    async fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((origin, destination));
        }
        if let Some(error) = &self.failure {
            return Err(RouteProviderError::Transport(error.clone()));
        }
        if self.routes.is_empty() {
            return Err(RouteProviderError::NoRouteFound);
        }
        Ok(self.routes.clone())
    }
}

/// In-memory incident store.
///
/// Identifiers are assigned sequentially from one. A store built with
/// [`MemoryIncidentStore::failing`] rejects every operation.
#[derive(Debug, Default)]
pub struct MemoryIncidentStore {
    incidents: Mutex<Vec<IncidentRecord>>,
    failure: Option<String>,
}

impl MemoryIncidentStore {
    /// Store seeded with `incidents`.
    #[must_use]
    pub fn with_incidents(incidents: Vec<IncidentReport>) -> Self {
        Self::with_records(incidents.into_iter().map(IncidentRecord::from).collect())
    }

    /// Store seeded with raw rows, which may lack a usable position.
    #[must_use]
    pub fn with_records(records: Vec<IncidentRecord>) -> Self {
        Self {
            incidents: Mutex::new(records),
            failure: None,
        }
    }

    /// Store whose every operation fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            incidents: Mutex::default(),
            failure: Some(message.to_owned()),
        }
    }

    fn poisoned() -> String {
        "incident store lock poisoned".to_owned()
    }
}

#[async_trait]
impl IncidentStore for MemoryIncidentStore {
    async fn list_all(&self) -> Result<Vec<IncidentRecord>, IncidentStoreError> {
        if let Some(message) = &self.failure {
            return Err(IncidentStoreError::Read {
                message: message.clone(),
            });
        }
        self.incidents
            .lock()
            .map(|incidents| incidents.clone())
            .map_err(|_| IncidentStoreError::Read {
                message: Self::poisoned(),
            })
    }
}

#[async_trait]
impl IncidentSink for MemoryIncidentStore {
    async fn record(&self, incident: NewIncident) -> Result<i64, IncidentStoreError> {
        if let Some(message) = &self.failure {
            return Err(IncidentStoreError::Write {
                message: message.clone(),
            });
        }
        let mut incidents = self
            .incidents
            .lock()
            .map_err(|_| IncidentStoreError::Write {
                message: Self::poisoned(),
            })?;
        let id = incidents.iter().map(|record| record.id).max().unwrap_or(0) + 1;
        incidents.push(IncidentRecord::from(IncidentReport {
            id,
            latitude: incident.latitude,
            longitude: incident.longitude,
            category: incident.category,
            recorded_at: MEMORY_RECORDED_AT.to_owned(),
        }));
        Ok(id)
    }
}
