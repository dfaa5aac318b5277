//! Core of the dropwise delivery-route planner.
//!
//! A [`DeliverySession`] collects destinations clicked on a map, ranks them by
//! travel time from a movable origin and asks a routing service for a path
//! through them in that order. The matrix and routing collaborators are
//! injected through the [`TravelTimeService`] and [`RouteService`] traits and
//! the drawing surface through [`RenderSink`], so the crate performs no I/O of
//! its own.

#![forbid(unsafe_code)]

mod coordinate;
mod engine;
pub mod point;
mod ranker;
mod registry;
mod render;
pub mod routing;
mod session;
#[doc(hidden)]
pub mod test_support;
pub mod travel_time;

pub use coordinate::{Coordinate, CoordinateError, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use engine::{ComputedRoute, RecomputeError, RouteRecomputationEngine, RouteWaypoints};
pub use ranker::{RankedDestination, RankingError, TravelTimeRanker};
pub use registry::DestinationRegistry;
pub use render::{MarkerHandle, RenderSink};
pub use routing::{RouteError, RoutePath, RouteService};
pub use session::{DeliverySession, RecomputeOutcome, SessionError};
pub use travel_time::{TravelTimeError, TravelTimeService};
