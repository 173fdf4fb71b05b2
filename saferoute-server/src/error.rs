//! Error types emitted by the `saferoute` binary.
//!
//! Keep this error type reasonably small, as many helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use saferoute_data::{ProviderBuildError, SqliteIncidentStoreError};
use thiserror::Error;

/// Errors emitted while configuring or running the server.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply the option.
        env: &'static str,
    },
    /// Constructing an HTTP adapter failed.
    #[error("failed to build {service} client for {base_url:?}: {source}")]
    BuildProvider {
        /// Which Google service the adapter targets.
        service: &'static str,
        /// Endpoint the adapter was configured with.
        base_url: String,
        #[source]
        /// Underlying construction failure.
        source: ProviderBuildError,
    },
    /// Opening the incident database failed.
    #[error("failed to open incident database at {path:?}: {source}")]
    OpenStore {
        /// Database path from configuration.
        path: Utf8PathBuf,
        #[source]
        /// Underlying store failure.
        source: SqliteIncidentStoreError,
    },
    /// Binding the listening socket failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the server tried to listen on.
        addr: String,
        #[source]
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// The HTTP server stopped with an error.
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
