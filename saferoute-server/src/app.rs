//! HTTP routes and handlers.
//!
//! The router exposes the safe-route query at `/safe-route` and at
//! `/api/crimes/safe-route`, incident ingestion and listing under
//! `/api/crimes`, and a `/health` check. Failures are reported as
//! `{ "error": <message> }` bodies.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use saferoute_core::{
    IncidentRecord, IncidentSink, IncidentStore, NewIncident, SafeRouteError, SafeRouteService,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    service: SafeRouteService,
    incidents: Arc<dyn IncidentStore>,
    sink: Arc<dyn IncidentSink>,
}

impl AppState {
    /// Bundle the route service with the incident store it reads and the sink
    /// new reports are written to.
    #[must_use]
    pub fn new(
        service: SafeRouteService,
        incidents: Arc<dyn IncidentStore>,
        sink: Arc<dyn IncidentSink>,
    ) -> Self {
        Self {
            service,
            incidents,
            sink,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/safe-route", get(safe_route))
        .route("/api/crimes/safe-route", get(safe_route))
        .route("/api/crimes/add", post(add_incident))
        .route("/api/crimes/fetch", get(fetch_incidents))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SafeRouteQuery {
    origin: Option<String>,
    destination: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SafeRouteResponse {
    safest_route: Value,
    crime_count: usize,
}

#[derive(Debug, Serialize)]
struct IncidentAdded {
    message: &'static str,
    id: i64,
}

/// Failures rendered as JSON error bodies.
#[derive(Debug)]
enum ApiError {
    SafeRoute(SafeRouteError),
    AddIncident,
    FetchIncidents,
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::SafeRoute(err) => match err.status_code() {
                400 => (StatusCode::BAD_REQUEST, "Origin and destination are required"),
                404 => (StatusCode::NOT_FOUND, "No routes found"),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to compute safe route",
                ),
            },
            Self::AddIncident => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not add crime report",
            ),
            Self::FetchIncidents => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not fetch crime reports",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn safe_route(
    State(state): State<AppState>,
    Query(query): Query<SafeRouteQuery>,
) -> Result<Json<SafeRouteResponse>, ApiError> {
    info!(
        "safe route requested from {:?} to {:?}",
        query.origin, query.destination
    );
    let scored = state
        .service
        .compute_safe_route(query.origin.as_deref(), query.destination.as_deref())
        .await
        .map_err(ApiError::SafeRoute)?;
    Ok(Json(SafeRouteResponse {
        safest_route: scored.route.raw,
        crime_count: scored.incident_count,
    }))
}

async fn add_incident(
    State(state): State<AppState>,
    Json(incident): Json<NewIncident>,
) -> Result<(StatusCode, Json<IncidentAdded>), ApiError> {
    info!(
        "recording {:?} incident at {},{}",
        incident.category, incident.latitude, incident.longitude
    );
    let id = state.sink.record(incident).await.map_err(|err| {
        error!("adding incident failed: {err}");
        ApiError::AddIncident
    })?;
    Ok((
        StatusCode::CREATED,
        Json(IncidentAdded {
            message: "Crime report added successfully",
            id,
        }),
    ))
}

async fn fetch_incidents(
    State(state): State<AppState>,
) -> Result<Json<Vec<IncidentRecord>>, ApiError> {
    info!("listing incidents");
    let records = state.incidents.list_all().await.map_err(|err| {
        error!("listing incidents failed: {err}");
        ApiError::FetchIncidents
    })?;
    Ok(Json(records))
}
