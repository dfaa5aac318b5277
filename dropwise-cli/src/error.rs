//! Error types emitted by the dropwise CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dropwise_core::CoordinateError;
use dropwise_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the dropwise CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// The request timeout resolved to zero seconds.
    #[error("--{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
    /// Opening the delivery script failed.
    #[error("failed to open delivery script at {path:?}: {source}")]
    OpenScript {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The delivery script JSON could not be decoded.
    #[error("failed to parse delivery script JSON at {path:?}: {source}")]
    ParseScript {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The delivery script names an out-of-range origin.
    #[error("delivery script in {path:?} has an invalid origin: {source}")]
    InvalidOrigin {
        path: Utf8PathBuf,
        #[source]
        source: CoordinateError,
    },
    /// Constructing the OSRM services failed.
    #[error("failed to build route services for {base_url:?}: {source}")]
    BuildRouteServices {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Building the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serialising the GeoJSON output failed.
    #[error("failed to serialise GeoJSON output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
