//! Request routed paths through an ordered list of waypoints.
//!
//! The [`RouteService`] trait abstracts the multi-waypoint routing
//! collaborator. It receives the waypoints in visiting order, origin first,
//! and answers with the [`RoutePath`] to draw.

mod error;
mod path;
mod service;

pub use error::RouteError;
pub use path::RoutePath;
pub use service::RouteService;
