//! Fetch candidate routes between two coordinates.
//!
//! The `RouteProvider` trait abstracts an external directions service that
//! offers one or more alternative routes. The order of the returned
//! candidates is provider-defined and is preserved downstream, where it acts
//! as the tie-break between equally scored routes.

mod error;
mod provider;

pub use error::RouteProviderError;
pub use provider::RouteProvider;
