//! OSRM-backed implementations of the core matrix and routing services.
//!
//! [`OsrmTravelTimeService`] answers one-to-many travel-time queries through
//! the OSRM Table API and [`OsrmRouteService`] computes ordered multi-stop
//! paths through the Route API. Both share an [`OsrmServiceConfig`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use dropwise_core::{Coordinate, RouteRecomputationEngine};
//! use dropwise_data::routing::{OsrmRouteService, OsrmServiceConfig, OsrmTravelTimeService};
//!
//! let config = OsrmServiceConfig::new("http://localhost:5000")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(10));
//! let engine = RouteRecomputationEngine::new(
//!     OsrmTravelTimeService::with_config(config.clone())?,
//!     OsrmRouteService::with_config(config)?,
//! );
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
//! let route = runtime.block_on(engine.recompute(
//!     Coordinate::new(3.158101, 101.711018),
//!     &[Coordinate::new(3.20, 101.70), Coordinate::new(3.05, 101.75)],
//! ))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod osrm;
mod route;
mod table;
mod transport;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, OsrmServiceConfig, ProviderBuildError,
};
pub use route::OsrmRouteService;
pub use table::OsrmTravelTimeService;
