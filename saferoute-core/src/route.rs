//! Candidate routes returned by a directions service.

use serde_json::Value;

use crate::Coordinate;

/// An atomic path segment with a start and end position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStep {
    /// Position where the step begins.
    pub start_location: Coordinate,
    /// Position where the step ends.
    pub end_location: Coordinate,
}

impl RouteStep {
    /// Construct a step between two positions.
    #[must_use]
    pub const fn new(start_location: Coordinate, end_location: Coordinate) -> Self {
        Self {
            start_location,
            end_location,
        }
    }
}

/// Ordered steps between two waypoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteLeg {
    /// Steps in path order.
    pub steps: Vec<RouteStep>,
}

impl RouteLeg {
    /// Construct a leg from steps in path order.
    #[must_use]
    pub const fn new(steps: Vec<RouteStep>) -> Self {
        Self { steps }
    }
}

/// A route offered by the directions service.
///
/// `raw` holds the provider's native representation of the route. It is never
/// inspected beyond extracting legs and steps and is returned to callers
/// unmodified.
///
/// # Examples
///
/// ```
/// use saferoute_core::{Coordinate, RouteCandidate, RouteLeg, RouteStep};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 0.01);
/// let c = Coordinate::new(0.01, 0.01);
/// let route = RouteCandidate::new(
///     vec![
///         RouteLeg::new(vec![RouteStep::new(a, b)]),
///         RouteLeg::new(vec![RouteStep::new(b, c)]),
///     ],
///     serde_json::json!({ "summary": "A1" }),
/// );
/// assert_eq!(route.steps().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Legs in path order.
    pub legs: Vec<RouteLeg>,
    /// Provider-native route payload.
    pub raw: Value,
}

impl RouteCandidate {
    /// Construct a candidate from its legs and raw provider payload.
    #[must_use]
    pub const fn new(legs: Vec<RouteLeg>, raw: Value) -> Self {
        Self { legs, raw }
    }

    /// Iterate over every step of every leg in path order.
    pub fn steps(&self) -> impl Iterator<Item = &RouteStep> + '_ {
        self.legs.iter().flat_map(|leg| leg.steps.iter())
    }
}

/// The winning candidate together with its incident count.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRoute {
    /// Selected route.
    pub route: RouteCandidate,
    /// Number of (step, incident) pairs within the proximity threshold.
    pub incident_count: usize,
}
