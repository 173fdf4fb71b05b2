//! Shared HTTP plumbing for the Google web-service adapters.

use std::time::Duration;

use reqwest::Client;
use saferoute_core::TransportError;
use thiserror::Error;

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "saferoute/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error raised when an HTTP adapter cannot be constructed.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Connection settings for a Google web-service endpoint.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use saferoute_data::HttpServiceConfig;
///
/// let config = HttpServiceConfig::new("https://maps.example.com/geocode/json", "secret")
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("tests/1.0");
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct HttpServiceConfig {
    /// Endpoint URL, without query parameters.
    pub base_url: String,
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServiceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpServiceConfig {
    /// Create a configuration for `base_url` authenticated with `api_key`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn build_client(&self) -> Result<Client, ProviderBuildError> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)
    }

    /// Classify a `reqwest` failure. The reported URL never carries the key.
    pub(crate) fn convert_reqwest_error(&self, error: reqwest::Error) -> TransportError {
        let url = self.base_url.clone();
        if error.is_timeout() {
            return TransportError::Timeout {
                url,
                timeout_secs: self.timeout.as_secs(),
            };
        }

        let status = error.status();
        let decode = error.is_decode();
        let message = error.without_url().to_string();
        match status {
            Some(code) => TransportError::Http {
                url,
                status: code.as_u16(),
                message,
            },
            None if decode => TransportError::Parse { message },
            None => TransportError::Network { url, message },
        }
    }
}
