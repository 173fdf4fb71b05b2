//! Adapters connecting the safe-route engine to the outside world.
//!
//! Responsibilities:
//! - Implement the core collaborator traits against the Google Geocoding and
//!   Directions web services.
//! - Persist and read incident reports from SQLite.
//!
//! Boundaries:
//! - Do not encode domain rules (they live in `saferoute-core`).
//! - Keep blocking I/O off async executors; SQLite work runs on the blocking
//!   pool.
//!
//! Invariants:
//! - API keys never appear in error messages or debug output.
//! - No global mutable state.

pub mod directions;
pub mod geocoding;
mod google;
mod http;
pub mod store;

pub use directions::HttpRouteProvider;
pub use geocoding::HttpGeocoder;
pub use http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpServiceConfig, ProviderBuildError};
pub use store::{SqliteIncidentStore, SqliteIncidentStoreError};
