//! HTTP front end and command-line entry point for the safe-route engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod app;
mod error;
mod serve;

pub use app::{AppState, router};
pub use error::CliError;

use serve::ServeArgs;

const ARG_BIND_ADDR: &str = "bind-addr";
const ARG_PORT: &str = "port";
const ARG_DATABASE: &str = "database";
const ARG_GOOGLE_API_KEY: &str = "google-api-key";
const ARG_GEOCODE_BASE_URL: &str = "geocode-base-url";
const ARG_DIRECTIONS_BASE_URL: &str = "directions-base-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_GOOGLE_API_KEY: &str = "SAFEROUTE_CMDS_SERVE_GOOGLE_API_KEY";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration merging, start-up
/// or serving fails.
pub async fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Serve(args) => {
            let config = args.into_config()?;
            serve::serve(config).await
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "saferoute",
    about = "Recommend the route with the fewest reported incidents nearby",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the safe-route HTTP API.
    Serve(ServeArgs),
}

#[cfg(test)]
mod tests;
