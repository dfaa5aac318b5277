//! Route command implementation for the dropwise CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use dropwise_core::{
    Coordinate, DeliverySession, RecomputeOutcome, RouteRecomputationEngine, RouteService,
    SessionError, TravelTimeService,
};
use dropwise_data::routing::{OsrmRouteService, OsrmServiceConfig, OsrmTravelTimeService};
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::create_utf8_file;
use crate::script::{DeliveryScript, ScriptEvent, load_script};
use crate::{
    ARG_ROUTE_OSRM_BASE_URL, ARG_ROUTE_OUTPUT, ARG_ROUTE_PROFILE, ARG_ROUTE_SCRIPT,
    ARG_ROUTE_TIMEOUT_SECS, CliError, ENV_ROUTE_SCRIPT, GeoJsonSink,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Replay a recorded delivery session against an OSRM server. \
                 Every click re-ranks all destinations by travel time from \
                 the origin and routes through them nearest first. The final \
                 map state is printed as a GeoJSON FeatureCollection.",
    about = "Replay a delivery script and print the route as GeoJSON"
)]
#[ortho_config(prefix = "DROPWISE")]
pub(crate) struct RouteArgs {
    /// Path to a JSON delivery script.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) script_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_ROUTE_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile.
    #[arg(long = ARG_ROUTE_PROFILE, value_name = "name")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_ROUTE_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Write the GeoJSON to this file instead of stdout.
    #[arg(long = ARG_ROUTE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    /// Path to the delivery script.
    pub(crate) script_path: Utf8PathBuf,
    /// Settings shared by both OSRM services.
    pub(crate) osrm: OsrmServiceConfig,
    /// Output file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let script_path = args.script_path.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_SCRIPT,
            env: ENV_ROUTE_SCRIPT,
        })?;

        let mut osrm = OsrmServiceConfig::default();
        if let Some(base_url) = args.osrm_base_url {
            osrm.base_url = base_url;
        }
        if let Some(profile) = args.profile {
            osrm.profile = profile;
        }
        match args.timeout_secs {
            Some(0) => {
                return Err(CliError::ZeroTimeout {
                    field: ARG_ROUTE_TIMEOUT_SECS,
                });
            }
            Some(seconds) => osrm.timeout = Duration::from_secs(seconds),
            None => {}
        }

        Ok(Self {
            script_path,
            osrm,
            output: args.output,
        })
    }
}

/// Engine with type-erased services, as built for a replay.
pub(crate) type ReplayEngine =
    RouteRecomputationEngine<Box<dyn TravelTimeService>, Box<dyn RouteService>>;

/// Builds the routing engine for the current route invocation.
pub(crate) trait RouteEngineBuilder {
    fn build(&self, config: &OsrmServiceConfig) -> Result<ReplayEngine, CliError>;
}

pub(crate) struct OsrmEngineBuilder;

impl RouteEngineBuilder for OsrmEngineBuilder {
    fn build(&self, config: &OsrmServiceConfig) -> Result<ReplayEngine, CliError> {
        let build_error = |source| CliError::BuildRouteServices {
            base_url: config.base_url.clone(),
            source,
        };
        let matrix: Box<dyn TravelTimeService> =
            Box::new(OsrmTravelTimeService::with_config(config.clone()).map_err(build_error)?);
        let router: Box<dyn RouteService> =
            Box::new(OsrmRouteService::with_config(config.clone()).map_err(build_error)?);
        Ok(RouteRecomputationEngine::new(matrix, router))
    }
}

/// Tally of a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub(crate) rendered: usize,
    pub(crate) rejected: usize,
    pub(crate) failed: usize,
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &OsrmEngineBuilder, &mut stdout)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteEngineBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let script = load_script(&config.script_path)?;
    let engine = builder.build(&config.osrm)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let (sink, summary) = runtime.block_on(replay(&script, engine));
    info!(
        "replayed {} events: {} rendered, {} rejected, {} failed",
        script.events.len(),
        summary.rendered,
        summary.rejected,
        summary.failed
    );

    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_geojson(&mut file, &sink)
        }
        None => write_geojson(writer, &sink),
    }
}

/// Drive a session through every scripted event in order.
///
/// Rejected coordinates and failed recomputations are counted and the replay
/// moves on; the sink keeps whatever the last successful recomputation drew.
pub(crate) async fn replay<M, R>(
    script: &DeliveryScript,
    engine: RouteRecomputationEngine<M, R>,
) -> (GeoJsonSink, ReplaySummary)
where
    M: TravelTimeService,
    R: RouteService,
{
    let session = DeliverySession::new(script.origin(), engine, GeoJsonSink::new());
    let mut summary = ReplaySummary::default();

    for (index, event) in script.events.iter().enumerate() {
        let outcome = match *event {
            ScriptEvent::Click {
                latitude,
                longitude,
            } => session.click(Coordinate::new(latitude, longitude)).await,
            ScriptEvent::RelocateOrigin {
                latitude,
                longitude,
            } => {
                session
                    .relocate_origin(Coordinate::new(latitude, longitude))
                    .await
            }
        };
        match outcome {
            Ok(RecomputeOutcome::Rendered(_)) => summary.rendered += 1,
            Ok(RecomputeOutcome::NoDestinations | RecomputeOutcome::Superseded { .. }) => {}
            Err(SessionError::InvalidCoordinate(err)) => {
                warn!("event {index} ignored: {err}");
                summary.rejected += 1;
            }
            Err(SessionError::Recompute(err)) => {
                warn!("event {index} kept the previous route: {err}");
                summary.failed += 1;
            }
        }
    }

    (session.into_sink(), summary)
}

fn write_geojson(writer: &mut dyn Write, sink: &GeoJsonSink) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(&sink.to_geojson()).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
