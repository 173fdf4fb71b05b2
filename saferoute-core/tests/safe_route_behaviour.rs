//! Behavioural coverage for [`SafeRouteService`] using in-memory collaborators.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use saferoute_core::test_support::{
    MemoryIncidentStore, StubGeocoder, StubRouteProvider, block_on, incident_at, named_route,
};
use saferoute_core::{Coordinate, SafeRouteError, SafeRouteService, ScoredRoute};
use serde_json::json;
use std::cell::RefCell;
use std::sync::Arc;

type OutcomeCell = RefCell<Option<Result<ScoredRoute, SafeRouteError>>>;

const HOME: Coordinate = Coordinate::new(0.0, 0.0);
const WORK: Coordinate = Coordinate::new(0.0, 0.02);

#[fixture]
fn geocoder() -> Arc<StubGeocoder> {
    Arc::new(
        StubGeocoder::default()
            .with_address("Home", HOME)
            .with_address("Work", WORK),
    )
}

#[fixture]
fn directions() -> RefCell<Option<Arc<StubRouteProvider>>> {
    RefCell::new(None)
}

#[fixture]
fn store() -> RefCell<MemoryIncidentStore> {
    RefCell::new(MemoryIncidentStore::default())
}

#[fixture]
fn outcome() -> OutcomeCell {
    RefCell::new(None)
}

fn provider(cell: &RefCell<Option<Arc<StubRouteProvider>>>) -> Arc<StubRouteProvider> {
    cell.borrow()
        .clone()
        .unwrap_or_else(|| panic!("directions service must be configured"))
}

fn request(
    geocoder: &Arc<StubGeocoder>,
    directions: &RefCell<Option<Arc<StubRouteProvider>>>,
    store: &RefCell<MemoryIncidentStore>,
    outcome: &OutcomeCell,
    origin: Option<&str>,
    destination: Option<&str>,
) {
    let incidents = store.replace(MemoryIncidentStore::default());
    let service = SafeRouteService::new(
        geocoder.clone(),
        provider(directions),
        Arc::new(incidents),
    );
    *outcome.borrow_mut() = Some(block_on(service.compute_safe_route(origin, destination)));
}

fn scored(outcome: &OutcomeCell) -> ScoredRoute {
    match outcome.borrow().as_ref() {
        Some(Ok(scored)) => scored.clone(),
        Some(Err(err)) => panic!("expected a route, got error: {err}"),
        None => panic!("request must have been made"),
    }
}

fn failure(outcome: &OutcomeCell) -> SafeRouteError {
    match outcome.borrow().as_ref() {
        Some(Err(err)) => err.clone(),
        Some(Ok(scored)) => panic!("expected an error, got {scored:?}"),
        None => panic!("request must have been made"),
    }
}

// --- Given steps ---

#[given("a directions service offering a direct route and a detour")]
fn two_candidates(#[from(directions)] directions: &RefCell<Option<Arc<StubRouteProvider>>>) {
    *directions.borrow_mut() = Some(Arc::new(StubRouteProvider::with_routes(vec![
        named_route("direct", &[HOME, Coordinate::new(0.0, 0.01), WORK]),
        named_route("detour", &[HOME, Coordinate::new(0.05, 0.01), WORK]),
    ])));
}

#[given("a directions service with no routes")]
fn no_candidates(#[from(directions)] directions: &RefCell<Option<Arc<StubRouteProvider>>>) {
    *directions.borrow_mut() = Some(Arc::new(StubRouteProvider::default()));
}

#[given("an incident beside the direct route")]
fn incident_beside_direct(#[from(store)] store: &RefCell<MemoryIncidentStore>) {
    *store.borrow_mut() = MemoryIncidentStore::with_incidents(vec![incident_at(1, 0.0, 0.0101)]);
}

#[given("an incident store that cannot be read")]
fn unreadable_store(#[from(store)] store: &RefCell<MemoryIncidentStore>) {
    *store.borrow_mut() = MemoryIncidentStore::failing("database is locked");
}

// --- When steps ---

#[when("I request a safe route from Home to Work")]
fn request_home_to_work(
    #[from(geocoder)] geocoder: &Arc<StubGeocoder>,
    #[from(directions)] directions: &RefCell<Option<Arc<StubRouteProvider>>>,
    #[from(store)] store: &RefCell<MemoryIncidentStore>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    request(geocoder, directions, store, outcome, Some("Home"), Some("Work"));
}

#[when("I request a safe route from Home without a destination")]
fn request_without_destination(
    #[from(geocoder)] geocoder: &Arc<StubGeocoder>,
    #[from(directions)] directions: &RefCell<Option<Arc<StubRouteProvider>>>,
    #[from(store)] store: &RefCell<MemoryIncidentStore>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    request(geocoder, directions, store, outcome, Some("Home"), None);
}

#[when("I request a safe route between literal coordinates")]
fn request_literal(
    #[from(geocoder)] geocoder: &Arc<StubGeocoder>,
    #[from(directions)] directions: &RefCell<Option<Arc<StubRouteProvider>>>,
    #[from(store)] store: &RefCell<MemoryIncidentStore>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    request(
        geocoder,
        directions,
        store,
        outcome,
        Some("51.5007,-0.1246"),
        Some("51.5055, -0.0754"),
    );
}

// --- Then steps ---

#[then("the detour is returned with no nearby incidents")]
fn detour_returned(#[from(outcome)] outcome: &OutcomeCell) {
    let route = scored(outcome);
    assert_eq!(route.route.raw, json!({ "summary": "detour" }));
    assert_eq!(route.incident_count, 0);
}

#[then("the direct route is returned")]
fn direct_returned(#[from(outcome)] outcome: &OutcomeCell) {
    let route = scored(outcome);
    assert_eq!(route.route.raw, json!({ "summary": "direct" }));
}

#[then("a missing parameter error is returned")]
fn missing_parameter(#[from(outcome)] outcome: &OutcomeCell) {
    let err = failure(outcome);
    assert_eq!(
        err,
        SafeRouteError::MissingParameter {
            name: "destination"
        }
    );
    assert_eq!(err.status_code(), 400);
}

#[then("no external service was called")]
fn nothing_called(
    #[from(geocoder)] geocoder: &Arc<StubGeocoder>,
    #[from(directions)] directions: &RefCell<Option<Arc<StubRouteProvider>>>,
) {
    assert_eq!(geocoder.calls(), 0);
    assert_eq!(provider(directions).calls(), 0);
}

#[then("a not found error is returned")]
fn not_found(#[from(outcome)] outcome: &OutcomeCell) {
    let err = failure(outcome);
    assert_eq!(err, SafeRouteError::NoRouteFound);
    assert_eq!(err.status_code(), 404);
}

#[then("the geocoder was not called")]
fn geocoder_idle(#[from(geocoder)] geocoder: &Arc<StubGeocoder>) {
    assert_eq!(geocoder.calls(), 0);
}

#[then("the directions service received the literal coordinates")]
fn literal_forwarded(#[from(directions)] directions: &RefCell<Option<Arc<StubRouteProvider>>>) {
    assert_eq!(
        provider(directions).requests(),
        vec![(
            Coordinate::new(51.5007, -0.1246),
            Coordinate::new(51.5055, -0.0754)
        )]
    );
}

#[then("a server error is returned")]
fn server_error(#[from(outcome)] outcome: &OutcomeCell) {
    let err = failure(outcome);
    assert!(
        matches!(err, SafeRouteError::StoreRead(_)),
        "expected StoreRead, got {err:?}"
    );
    assert_eq!(err.status_code(), 500);
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/safe_route.feature", name = $title)]
        fn $fn_name(
            geocoder: Arc<StubGeocoder>,
            directions: RefCell<Option<Arc<StubRouteProvider>>>,
            store: RefCell<MemoryIncidentStore>,
            outcome: OutcomeCell,
        ) {
            let _ = (geocoder, directions, store, outcome);
        }
    };
}

register_scenario!(
    choosing_fewer_incidents,
    "choosing the route with fewer nearby incidents"
);
register_scenario!(keeping_provider_order, "keeping the provider order on a tie");
register_scenario!(
    rejecting_missing_destination,
    "rejecting a request without a destination"
);
register_scenario!(reporting_no_routes, "reporting when no routes exist");
register_scenario!(
    skipping_geocoding_for_literals,
    "skipping geocoding for literal coordinates"
);
register_scenario!(
    failing_unreadable_store,
    "failing when incidents cannot be read"
);
