//! Command-line interface for replaying dropwise delivery sessions.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod route;
mod script;
mod sink;

pub use error::CliError;
pub use sink::GeoJsonSink;

use route::{RouteArgs, run_route};

const ARG_ROUTE_SCRIPT: &str = "script";
const ARG_ROUTE_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_ROUTE_PROFILE: &str = "profile";
const ARG_ROUTE_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_ROUTE_OUTPUT: &str = "output";
const ENV_ROUTE_SCRIPT: &str = "DROPWISE_CMDS_ROUTE_SCRIPT_PATH";

/// Run the dropwise CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration layering,
/// script loading or output fails. Routing failures during a replay are
/// logged and do not abort the command.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dropwise",
    about = "Nearest-first delivery route planning against an OSRM server",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a delivery script and print the resulting route as GeoJSON.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
