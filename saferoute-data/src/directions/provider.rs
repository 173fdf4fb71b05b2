//! HTTP `RouteProvider` backed by the Google Directions API.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Request};
use saferoute_core::{
    Coordinate, RouteCandidate, RouteLeg, RouteProvider, RouteProviderError, RouteStep,
    TransportError,
};
use serde::Deserialize;
use serde_json::Value;

use crate::http::{HttpServiceConfig, ProviderBuildError};

use super::google::{DirectionsResponse, RouteShape, STATUS_OK, STATUS_ZERO_RESULTS};

/// Default Directions API endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Route provider requesting alternative routes from the Directions API.
///
/// Every request sets `alternatives=true` so the service may offer more than
/// one candidate. Candidates keep the order the service returned them in.
#[derive(Debug)]
pub struct HttpRouteProvider {
    client: Client,
    config: HttpServiceConfig,
}

impl HttpRouteProvider {
    /// Create a provider for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpServiceConfig::new(DEFAULT_DIRECTIONS_URL, api_key))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, ProviderBuildError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn build_request(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Request, TransportError> {
        let origin_param = origin.to_string();
        let destination_param = destination.to_string();
        self.client
            .get(&self.config.base_url)
            .query(&[
                ("origin", origin_param.as_str()),
                ("destination", destination_param.as_str()),
                ("alternatives", "true"),
                ("key", self.config.api_key.as_str()),
            ])
            .build()
            .map_err(|err| self.config.convert_reqwest_error(err))
    }

    async fn fetch(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DirectionsResponse, TransportError> {
        let request = self.build_request(origin, destination)?;
        let response = self
            .client
            .execute(request)
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.config.convert_reqwest_error(err))?;

        response
            .json::<DirectionsResponse>()
            .await
            .map_err(|err| TransportError::Parse {
                message: err.without_url().to_string(),
            })
    }

    /// Convert a decoded response into route candidates.
    fn convert_response(
        response: DirectionsResponse,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError> {
        match response.status.as_str() {
            STATUS_OK | STATUS_ZERO_RESULTS => {}
            _ => {
                return Err(RouteProviderError::Transport(TransportError::Service {
                    status: response.status,
                    message: response.error_message.unwrap_or_default(),
                }));
            }
        }

        if response.routes.is_empty() {
            return Err(RouteProviderError::NoRouteFound);
        }

        response
            .routes
            .into_iter()
            .map(convert_route)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RouteProviderError::Transport)
    }
}

fn convert_route(raw: Value) -> Result<RouteCandidate, TransportError> {
    let shape = RouteShape::deserialize(&raw).map_err(|err| TransportError::Parse {
        message: format!("malformed route: {err}"),
    })?;
    let legs = shape
        .legs
        .into_iter()
        .map(|leg| {
            RouteLeg::new(
                leg.steps
                    .into_iter()
                    .map(|step| {
                        RouteStep::new(step.start_location.into(), step.end_location.into())
                    })
                    .collect(),
            )
        })
        .collect();
    Ok(RouteCandidate::new(legs, raw))
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
    async fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError> {
        debug!("requesting routes from {origin} to {destination}");
        let response = self.fetch(origin, destination).await?;
        let candidates = Self::convert_response(response)?;
        debug!("directions service offered {} routes", candidates.len());
        Ok(candidates)
    }
}
