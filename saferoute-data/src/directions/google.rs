//! Google Directions API response types.
//!
//! Routes are kept as raw JSON so they can be returned to callers unchanged.
//! Only the step endpoints are decoded for scoring.
//!
//! See: <https://developers.google.com/maps/documentation/directions/get-directions>

use serde::Deserialize;
use serde_json::Value;

pub use crate::google::{LatLng, STATUS_OK, STATUS_ZERO_RESULTS};

/// Directions API response body.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code, e.g. `"OK"`, `"ZERO_RESULTS"` or `"OVER_QUERY_LIMIT"`.
    pub status: String,

    /// Human-readable detail accompanying a non-`OK` status.
    #[serde(default)]
    pub error_message: Option<String>,

    /// Candidate routes in the provider's order.
    #[serde(default)]
    pub routes: Vec<Value>,
}

/// The parts of a route needed for scoring.
#[derive(Debug, Deserialize)]
pub struct RouteShape {
    /// Legs in travel order.
    pub legs: Vec<LegShape>,
}

/// Steps of a single leg.
#[derive(Debug, Deserialize)]
pub struct LegShape {
    /// Steps in travel order.
    #[serde(default)]
    pub steps: Vec<StepShape>,
}

/// Endpoints of a single step.
#[derive(Debug, Deserialize)]
pub struct StepShape {
    /// Where the step begins.
    pub start_location: LatLng,
    /// Where the step ends.
    pub end_location: LatLng,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "geocoded_waypoints": [],
        "routes": [
            {
                "summary": "A1",
                "legs": [
                    {
                        "distance": { "text": "1.2 km", "value": 1200 },
                        "steps": [
                            {
                                "start_location": { "lat": 51.5, "lng": -0.12 },
                                "end_location": { "lat": 51.51, "lng": -0.12 },
                                "html_instructions": "Head north"
                            }
                        ]
                    }
                ]
            }
        ],
        "status": "OK"
    }"#;

    #[test]
    fn deserialise_success_response() {
        let response: DirectionsResponse =
            serde_json::from_str(SAMPLE).expect("should deserialise");

        assert_eq!(response.status, STATUS_OK);
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0]["summary"], "A1");
    }

    #[test]
    fn route_shape_ignores_unknown_fields() {
        let response: DirectionsResponse =
            serde_json::from_str(SAMPLE).expect("should deserialise");
        let shape: RouteShape =
            serde_json::from_value(response.routes[0].clone()).expect("should decode shape");

        assert_eq!(shape.legs.len(), 1);
        let step = &shape.legs[0].steps[0];
        assert_eq!(step.start_location.lat, 51.5);
        assert_eq!(step.end_location.lat, 51.51);
    }

    #[test]
    fn deserialise_zero_results() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{ "routes": [], "status": "ZERO_RESULTS" }"#)
                .expect("should deserialise");
        assert_eq!(response.status, STATUS_ZERO_RESULTS);
        assert!(response.routes.is_empty());
    }
}
