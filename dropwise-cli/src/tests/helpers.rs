//! Test helpers for writing delivery scripts and building stub engines.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use dropwise_core::test_support::{StubRouteService, StubTravelTimeService};
use dropwise_core::{Coordinate, RouteRecomputationEngine, RouteService, TravelTimeService};
use dropwise_data::routing::OsrmServiceConfig;
use tempfile::TempDir;

use crate::CliError;
use crate::route::{ReplayEngine, RouteEngineBuilder};

pub(super) const A: Coordinate = Coordinate::new(3.20, 101.70);
pub(super) const B: Coordinate = Coordinate::new(3.05, 101.75);

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn temp_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Travel times placing `B` nearer the origin than `A`.
pub(super) fn b_before_a() -> Vec<(Coordinate, Duration)> {
    vec![(A, Duration::from_secs(800)), (B, Duration::from_secs(400))]
}

/// Builds stub engines answering from a fixed travel-time table.
#[derive(Debug, Clone)]
pub(super) struct StubEngineBuilder {
    pub(super) table: Vec<(Coordinate, Duration)>,
}

impl RouteEngineBuilder for StubEngineBuilder {
    fn build(&self, _config: &OsrmServiceConfig) -> Result<ReplayEngine, CliError> {
        let matrix: Box<dyn TravelTimeService> =
            Box::new(StubTravelTimeService::from_table(self.table.clone()));
        let router: Box<dyn RouteService> = Box::new(StubRouteService::straight_lines());
        Ok(RouteRecomputationEngine::new(matrix, router))
    }
}
