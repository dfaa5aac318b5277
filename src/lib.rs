//! Facade crate for the dropwise delivery routing engine.
//!
//! This crate re-exports the core domain types and exposes the OSRM-backed
//! services behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use dropwise_core::{
    ComputedRoute, Coordinate, CoordinateError, DeliverySession, DestinationRegistry,
    MarkerHandle, RankedDestination, RankingError, RecomputeError, RecomputeOutcome, RenderSink,
    RouteError, RoutePath, RouteRecomputationEngine, RouteService, RouteWaypoints, SessionError,
    TravelTimeError, TravelTimeRanker, TravelTimeService,
};

#[cfg(feature = "http")]
pub use dropwise_data::routing::{
    OsrmRouteService, OsrmServiceConfig, OsrmTravelTimeService, ProviderBuildError,
};
