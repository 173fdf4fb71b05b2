//! Spatial index over an incident snapshot.
//!
//! Incidents are stored as unit vectors on the sphere in an R\*-tree. For a
//! step with endpoints `s` and `e`, any incident within the threshold chord
//! `t` of either endpoint lies within `|s - e| / 2 + t` of their midpoint, so
//! one ball query per step yields a superset of the matches. Each hit is then
//! confirmed with the haversine test, which keeps counts identical to
//! [`score_route`](super::score_route).
//!
//! Positions outside the usual latitude and longitude ranges do not map
//! faithfully onto the sphere, so they are checked linearly instead.

use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::geodesy::within_threshold;
use crate::{
    Coordinate, EARTH_RADIUS_KM, IncidentReport, PROXIMITY_THRESHOLD_KM, RouteCandidate, RouteStep,
};

type IndexedIncident = GeomWithData<[f64; 3], Coordinate>;

/// Incident snapshot prepared for repeated proximity queries.
///
/// # Examples
///
/// ```
/// use saferoute_core::{Coordinate, IncidentIndex, IncidentReport, RouteStep};
///
/// let incident = IncidentReport {
///     id: 1,
///     latitude: 51.5,
///     longitude: -0.12,
///     category: "theft".into(),
///     recorded_at: String::new(),
/// };
/// let index = IncidentIndex::new(&[incident]);
/// let step = RouteStep::new(Coordinate::new(51.5, -0.121), Coordinate::new(51.6, -0.12));
/// assert_eq!(index.count_near_step(&step), 1);
/// ```
#[derive(Debug)]
pub struct IncidentIndex {
    tree: RTree<IndexedIncident>,
    stragglers: Vec<Coordinate>,
    total: usize,
}

impl IncidentIndex {
    /// Build an index over `incidents`.
    ///
    /// Incidents with non-finite components can never be near a step and are
    /// dropped.
    #[must_use]
    pub fn new(incidents: &[IncidentReport]) -> Self {
        let mut indexed = Vec::with_capacity(incidents.len());
        let mut stragglers = Vec::new();
        for location in incidents.iter().map(IncidentReport::location) {
            if !location.is_finite() {
                continue;
            }
            if in_range(location) {
                indexed.push(GeomWithData::new(unit_vector(location), location));
            } else {
                stragglers.push(location);
            }
        }
        let total = indexed.len() + stragglers.len();
        Self {
            tree: RTree::bulk_load(indexed),
            stragglers,
            total,
        }
    }

    /// Number of incidents that can take part in proximity checks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.total
    }

    /// Whether no incident can ever be near a step.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count incidents within the threshold of either endpoint of `step`.
    #[must_use]
    pub fn count_near_step(&self, step: &RouteStep) -> usize {
        if self.is_empty() {
            return 0;
        }
        let near = |location: &Coordinate| {
            within_threshold(step.start_location, *location)
                || within_threshold(step.end_location, *location)
        };
        let stragglers = self
            .stragglers
            .iter()
            .filter(|location| near(location))
            .count();

        if !(in_range(step.start_location) && in_range(step.end_location)) {
            let indexed = self.tree.iter().filter(|entry| near(&entry.data)).count();
            return indexed + stragglers;
        }

        let (centre, squared_radius) = query_ball(step);
        let indexed = self
            .tree
            .locate_within_distance(centre, squared_radius)
            .filter(|entry| near(&entry.data))
            .count();
        indexed + stragglers
    }

    /// Sum of [`count_near_step`](Self::count_near_step) over every step of
    /// `route`.
    #[must_use]
    pub fn score(&self, route: &RouteCandidate) -> usize {
        route.steps().map(|step| self.count_near_step(step)).sum()
    }
}

const fn in_range(location: Coordinate) -> bool {
    location.is_finite() && location.latitude.abs() <= 90.0 && location.longitude.abs() <= 180.0
}

#[expect(clippy::float_arithmetic, reason = "spherical to Cartesian projection")]
fn unit_vector(location: Coordinate) -> [f64; 3] {
    let (sin_lat, cos_lat) = location.latitude.to_radians().sin_cos();
    let (sin_lng, cos_lng) = location.longitude.to_radians().sin_cos();
    [cos_lat * cos_lng, cos_lat * sin_lng, sin_lat]
}

#[expect(
    clippy::float_arithmetic,
    reason = "ball bounds are derived from chord lengths on the unit sphere"
)]
fn query_ball(step: &RouteStep) -> ([f64; 3], f64) {
    let [sx, sy, sz] = unit_vector(step.start_location);
    let [ex, ey, ez] = unit_vector(step.end_location);
    let centre = [(sx + ex) / 2.0, (sy + ey) / 2.0, (sz + ez) / 2.0];
    let half_chord = ((sx - ex).powi(2) + (sy - ey).powi(2) + (sz - ez).powi(2)).sqrt() / 2.0;
    let threshold_chord = 2.0 * (PROXIMITY_THRESHOLD_KM / EARTH_RADIUS_KM / 2.0).sin();
    let radius = (half_chord + threshold_chord).mul_add(1.0 + 1e-6, 1e-12);
    (centre, radius * radius)
}
