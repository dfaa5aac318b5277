//! Routing service trait for multi-waypoint paths.

use std::sync::Arc;

use async_trait::async_trait;
use geo::Point;

use super::{error::RouteError, path::RoutePath};

/// Compute a routed path visiting waypoints in the given order.
///
/// Implementations must visit the waypoints exactly in the order supplied and
/// must reject fewer than two waypoints with
/// [`RouteError::TooFewWaypoints`].
#[async_trait]
pub trait RouteService: Send + Sync {
    /// Return the path through `waypoints`.
    async fn route(&self, waypoints: &[Point<f64>]) -> Result<RoutePath, RouteError>;
}

#[async_trait]
impl<T> RouteService for &T
where
    T: RouteService + ?Sized,
{
    async fn route(&self, waypoints: &[Point<f64>]) -> Result<RoutePath, RouteError> {
        (**self).route(waypoints).await
    }
}

#[async_trait]
impl<T> RouteService for Arc<T>
where
    T: RouteService + ?Sized,
{
    async fn route(&self, waypoints: &[Point<f64>]) -> Result<RoutePath, RouteError> {
        (**self).route(waypoints).await
    }
}

#[async_trait]
impl<T> RouteService for Box<T>
where
    T: RouteService + ?Sized,
{
    async fn route(&self, waypoints: &[Point<f64>]) -> Result<RoutePath, RouteError> {
        (**self).route(waypoints).await
    }
}
