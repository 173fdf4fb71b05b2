//! Count incidents near each candidate route.
//!
//! A route's score is the number of (step, incident) pairs where the incident
//! lies strictly within [`PROXIMITY_THRESHOLD_KM`](crate::PROXIMITY_THRESHOLD_KM)
//! of the step's start or end location. An incident close to both endpoints
//! of one step counts once for that step, but it counts again for every other
//! step it is close to. Lower scores are safer.
//!
//! [`score_route`] is the direct definition. [`IncidentIndex`] produces the
//! same counts from a spatial index and is what [`score_candidates`] uses.

mod index;

use rayon::prelude::*;

use crate::geodesy::within_threshold;
use crate::{IncidentReport, RouteCandidate, RouteStep};

pub use index::IncidentIndex;

/// Whether `incident` counts against `step`.
#[must_use]
pub fn step_is_near(step: &RouteStep, incident: &IncidentReport) -> bool {
    let location = incident.location();
    within_threshold(step.start_location, location) || within_threshold(step.end_location, location)
}

/// Count incidents near `route` by checking every step against every incident.
///
/// # Examples
///
/// ```
/// use saferoute_core::{Coordinate, IncidentReport, RouteCandidate, RouteLeg, RouteStep, score_route};
///
/// let step = RouteStep::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01));
/// let route = RouteCandidate::new(vec![RouteLeg::new(vec![step])], serde_json::Value::Null);
/// let incident = IncidentReport {
///     id: 1,
///     latitude: 0.0,
///     longitude: 0.001,
///     category: "theft".into(),
///     recorded_at: String::new(),
/// };
/// assert_eq!(score_route(&route, &[incident]), 1);
/// ```
#[must_use]
pub fn score_route(route: &RouteCandidate, incidents: &[IncidentReport]) -> usize {
    route
        .steps()
        .map(|step| {
            incidents
                .iter()
                .filter(|incident| step_is_near(step, incident))
                .count()
        })
        .sum()
}

/// Score every candidate against one incident snapshot.
///
/// The index is built once and candidates are scored in parallel. The result
/// is positionally aligned with `candidates`.
#[must_use]
pub fn score_candidates(candidates: &[RouteCandidate], incidents: &[IncidentReport]) -> Vec<usize> {
    let index = IncidentIndex::new(incidents);
    candidates
        .par_iter()
        .map(|candidate| index.score(candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;
    use crate::test_support::{incident_at, route_through};
    use rstest::{fixture, rstest};

    #[fixture]
    fn two_step_route() -> RouteCandidate {
        route_through(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.01),
            Coordinate::new(0.0, 0.02),
        ])
    }

    #[rstest]
    fn empty_snapshot_scores_zero(two_step_route: RouteCandidate) {
        assert_eq!(score_route(&two_step_route, &[]), 0);
        assert_eq!(score_candidates(&[two_step_route], &[]), vec![0]);
    }

    #[rstest]
    fn route_without_steps_scores_zero() {
        let route = RouteCandidate::new(Vec::new(), serde_json::Value::Null);
        let incidents = [incident_at(1, 0.0, 0.0)];
        assert_eq!(score_route(&route, &incidents), 0);
        assert_eq!(score_candidates(&[route], &incidents), vec![0]);
    }

    #[rstest]
    fn incident_near_both_endpoints_counts_once_per_step() {
        // Both endpoints sit within a few metres of the incident.
        let route = route_through(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.001)]);
        let incidents = [incident_at(1, 0.0, 0.0005)];
        assert_eq!(score_route(&route, &incidents), 1);
    }

    #[rstest]
    fn shared_endpoint_counts_for_each_step(two_step_route: RouteCandidate) {
        // Near the shared middle vertex and nothing else.
        let incidents = [incident_at(1, 0.0, 0.01)];
        assert_eq!(score_route(&two_step_route, &incidents), 2);
    }

    #[rstest]
    #[case(0.004, 1)]
    #[case(0.005, 0)]
    fn threshold_is_strict(#[case] offset: f64, #[case] expected: usize) {
        let route = route_through(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, -1.0)]);
        let incidents = [incident_at(1, offset, 0.0)];
        assert_eq!(score_route(&route, &incidents), expected);
        assert_eq!(score_candidates(&[route], &incidents), vec![expected]);
    }

    #[rstest]
    fn non_finite_incidents_never_count(two_step_route: RouteCandidate) {
        let incidents = [
            incident_at(1, f64::NAN, 0.0),
            incident_at(2, 0.0, f64::INFINITY),
        ];
        assert_eq!(score_route(&two_step_route, &incidents), 0);
        assert_eq!(score_candidates(&[two_step_route], &incidents), vec![0]);
    }

    #[rstest]
    fn candidate_scores_keep_input_order() {
        let quiet = route_through(&[Coordinate::new(10.0, 10.0), Coordinate::new(10.0, 10.01)]);
        let busy = route_through(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)]);
        let incidents = [
            incident_at(1, 0.0, 0.0),
            incident_at(2, 0.0, 0.0001),
            incident_at(3, 0.0, 0.01),
        ];
        let scores = score_candidates(&[quiet.clone(), busy.clone(), quiet], &incidents);
        assert_eq!(scores, vec![0, 3, 0]);
        assert_eq!(score_route(&busy, &incidents), 3);
    }
}
