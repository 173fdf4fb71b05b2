//! HTTP `Geocoder` backed by the Google Geocoding API.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Request};
use saferoute_core::{Coordinate, GeocodeError, Geocoder, TransportError};

use crate::http::{HttpServiceConfig, ProviderBuildError};

use super::google::{GeocodeResponse, STATUS_OK, STATUS_ZERO_RESULTS};

/// Default Geocoding API endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Geocoder issuing one Geocoding API request per lookup.
///
/// Results are never cached.
///
/// # Example
///
/// ```no_run
/// use saferoute_core::Geocoder;
/// use saferoute_data::{HttpGeocoder, HttpServiceConfig};
/// use saferoute_data::geocoding::DEFAULT_GEOCODE_URL;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let geocoder = HttpGeocoder::with_config(HttpServiceConfig::new(DEFAULT_GEOCODE_URL, "key"))?;
/// let coordinate = geocoder.geocode("Tower Bridge, London").await?;
/// println!("{coordinate}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpGeocoder {
    client: Client,
    config: HttpServiceConfig,
}

impl HttpGeocoder {
    /// Create a geocoder for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpServiceConfig::new(DEFAULT_GEOCODE_URL, api_key))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, ProviderBuildError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn build_request(&self, address: &str) -> Result<Request, TransportError> {
        self.client
            .get(&self.config.base_url)
            .query(&[("address", address), ("key", self.config.api_key.as_str())])
            .build()
            .map_err(|err| self.config.convert_reqwest_error(err))
    }

    async fn fetch(&self, address: &str) -> Result<GeocodeResponse, TransportError> {
        let request = self.build_request(address)?;
        let response = self
            .client
            .execute(request)
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.config.convert_reqwest_error(err))?;

        response
            .json::<GeocodeResponse>()
            .await
            .map_err(|err| TransportError::Parse {
                message: err.without_url().to_string(),
            })
    }

    /// Map a decoded response onto the first match.
    fn convert_response(
        address: &str,
        response: GeocodeResponse,
    ) -> Result<Coordinate, GeocodeError> {
        match response.status.as_str() {
            STATUS_OK | STATUS_ZERO_RESULTS => response
                .results
                .first()
                .map(|result| Coordinate::from(result.geometry.location))
                .ok_or_else(|| GeocodeError::AddressNotFound {
                    address: address.to_owned(),
                }),
            _ => Err(GeocodeError::Transport(TransportError::Service {
                status: response.status,
                message: response.error_message.unwrap_or_default(),
            })),
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        debug!("geocoding {address:?} via {}", self.config.base_url);
        let response = self.fetch(address).await?;
        Self::convert_response(address, response)
    }
}
