//! HTTP directions adapter.
//!
//! [`HttpRouteProvider`] implements [`saferoute_core::RouteProvider`] against
//! the Google Directions API. Each route is returned with its raw JSON
//! payload alongside the decoded step endpoints.

mod google;
mod provider;

pub use provider::{DEFAULT_DIRECTIONS_URL, HttpRouteProvider};
