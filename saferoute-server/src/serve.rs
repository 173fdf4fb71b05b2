//! `serve` command: configuration and server start-up.

use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::SafeRouteService;
use saferoute_data::directions::DEFAULT_DIRECTIONS_URL;
use saferoute_data::geocoding::DEFAULT_GEOCODE_URL;
use saferoute_data::{
    DEFAULT_TIMEOUT_SECS, HttpGeocoder, HttpRouteProvider, HttpServiceConfig, SqliteIncidentStore,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::app::{AppState, router};
use crate::{
    ARG_BIND_ADDR, ARG_DATABASE, ARG_DIRECTIONS_BASE_URL, ARG_GEOCODE_BASE_URL,
    ARG_GOOGLE_API_KEY, ARG_PORT, ARG_TIMEOUT_SECS, CliError, ENV_GOOGLE_API_KEY,
};

/// Address the server listens on when none is configured.
pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
/// Port the server listens on when none is configured.
pub(crate) const DEFAULT_PORT: u16 = 5001;
/// Incident database used when none is configured.
pub(crate) const DEFAULT_DATABASE: &str = "data/database.sqlite";

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Serve the safe-route HTTP API. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Run the safe-route HTTP server"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct ServeArgs {
    /// Interface to bind the listener to.
    #[arg(long = ARG_BIND_ADDR, value_name = "addr")]
    #[serde(default)]
    pub(crate) bind_addr: Option<String>,
    /// TCP port to listen on.
    #[arg(long = ARG_PORT, value_name = "port")]
    #[serde(default)]
    pub(crate) port: Option<u16>,
    /// Path to the SQLite incident database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Google Maps Platform API key.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Override the Geocoding API endpoint.
    #[arg(long = ARG_GEOCODE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocode_base_url: Option<String>,
    /// Override the Directions API endpoint.
    #[arg(long = ARG_DIRECTIONS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
    /// Timeout for each outbound request, in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` command configuration.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) bind_addr: String,
    pub(crate) port: u16,
    pub(crate) database: Utf8PathBuf,
    pub(crate) google_api_key: String,
    pub(crate) geocode_base_url: String,
    pub(crate) directions_base_url: String,
    pub(crate) timeout: Duration,
}

impl std::fmt::Debug for ServeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServeConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("google_api_key", &"<redacted>")
            .field("geocode_base_url", &self.geocode_base_url)
            .field("directions_base_url", &self.directions_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let google_api_key = args
            .google_api_key
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_GOOGLE_API_KEY,
                env: ENV_GOOGLE_API_KEY,
            })?;

        Ok(Self {
            bind_addr: args
                .bind_addr
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            port: args.port.unwrap_or(DEFAULT_PORT),
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            google_api_key,
            geocode_base_url: args
                .geocode_base_url
                .unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_owned()),
            directions_base_url: args
                .directions_base_url
                .unwrap_or_else(|| DEFAULT_DIRECTIONS_URL.to_owned()),
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

impl ServeConfig {
    /// Socket address string handed to the listener.
    pub(crate) fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn http_config(&self, base_url: &str) -> HttpServiceConfig {
        HttpServiceConfig::new(base_url, self.google_api_key.as_str()).with_timeout(self.timeout)
    }

    /// Wire the adapters and the incident database into shared handler state.
    pub(crate) fn build_state(&self) -> Result<AppState, CliError> {
        let geocoder =
            HttpGeocoder::with_config(self.http_config(&self.geocode_base_url)).map_err(
                |source| CliError::BuildProvider {
                    service: "geocoding",
                    base_url: self.geocode_base_url.clone(),
                    source,
                },
            )?;
        let routes = HttpRouteProvider::with_config(self.http_config(&self.directions_base_url))
            .map_err(|source| CliError::BuildProvider {
                service: "directions",
                base_url: self.directions_base_url.clone(),
                source,
            })?;
        let store = SqliteIncidentStore::open(&self.database)
            .map(Arc::new)
            .map_err(|source| CliError::OpenStore {
                path: self.database.clone(),
                source,
            })?;
        info!("using incident database at {}", store.path());

        let service = SafeRouteService::new(Arc::new(geocoder), Arc::new(routes), store.clone());
        Ok(AppState::new(service, store.clone(), store))
    }
}

/// Bind the listener and serve requests until interrupted.
pub(crate) async fn serve(config: ServeConfig) -> Result<(), CliError> {
    let state = config.build_state()?;
    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("safe-route server listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(CliError::Serve)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!("cannot listen for ctrl-c, serving until killed: {err}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServeConfig::try_from(merged)
}
