//! Failures shared by collaborators that call external web services.

use thiserror::Error;

/// Errors raised while talking to an external geocoding or directions service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete before the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL, without credentials.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL, without credentials.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL, without credentials.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service replied successfully at the HTTP level but reported an
    /// application-level failure status.
    #[error("service returned {status}: {message}")]
    Service {
        /// Provider status code, e.g. `"REQUEST_DENIED"`.
        status: String,
        /// Message supplied by the provider, if any.
        message: String,
    },
}
