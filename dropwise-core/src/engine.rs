//! Rank destinations, prepend the origin and route through the result.
//!
//! [`RouteRecomputationEngine::recompute`] runs the whole chain for one
//! origin and destination snapshot. Each call starts from scratch; nothing is
//! cached between calls. Ranking always completes before routing starts.

use log::debug;
use thiserror::Error;

use crate::{
    Coordinate, RankedDestination, RankingError, TravelTimeRanker,
    point::to_points,
    routing::{RouteError, RoutePath, RouteService},
    travel_time::TravelTimeService,
};

/// Ordered stops sent to the routing service: the origin, then the
/// destinations by ascending travel time.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use dropwise_core::{Coordinate, RankedDestination, RouteWaypoints};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let stop = Coordinate::new(1.0, 1.0);
/// let waypoints = RouteWaypoints::from_ranking(
///     origin,
///     &[RankedDestination { destination: stop, click_index: 0, travel_time: Duration::from_secs(9) }],
/// );
/// assert_eq!(waypoints.origin(), origin);
/// assert_eq!(waypoints.to_vec(), vec![origin, stop]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteWaypoints {
    origin: Coordinate,
    destinations: Vec<Coordinate>,
}

impl RouteWaypoints {
    /// Build `[origin] ++ ranked destinations`.
    #[must_use]
    pub fn from_ranking(origin: Coordinate, ranked: &[RankedDestination]) -> Self {
        Self {
            origin,
            destinations: ranked.iter().map(|entry| entry.destination).collect(),
        }
    }

    /// The origin, always the first waypoint.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Destinations in visiting order, without the origin.
    #[must_use]
    pub fn destinations(&self) -> &[Coordinate] {
        &self.destinations
    }

    /// All waypoints in visiting order, origin first.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.origin).chain(self.destinations.iter().copied())
    }

    /// Owned copy of all waypoints in visiting order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Coordinate> {
        self.iter().collect()
    }

    /// Number of waypoints, origin included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len() + 1
    }

    /// Always `false`: the origin is always present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// The result of one successful recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedRoute {
    /// Waypoints sent to the routing service.
    pub waypoints: RouteWaypoints,
    /// Path returned by the routing service.
    pub path: RoutePath,
}

/// Errors aborting a recomputation. The previously rendered path stays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecomputeError {
    /// Destinations could not be ranked.
    #[error("ranking failed: {0}")]
    RankingFailed(#[from] RankingError),
    /// The routing request failed or returned no usable path.
    #[error("route computation failed: {0}")]
    RouteComputationFailed(#[from] RouteError),
}

/// Orchestrates ranking and routing for a destination snapshot.
#[derive(Debug, Clone)]
pub struct RouteRecomputationEngine<M, R> {
    ranker: TravelTimeRanker<M>,
    router: R,
}

impl<M, R> RouteRecomputationEngine<M, R>
where
    M: TravelTimeService,
    R: RouteService,
{
    /// Construct an engine from a matrix service and a routing service.
    pub const fn new(matrix: M, router: R) -> Self {
        Self {
            ranker: TravelTimeRanker::new(matrix),
            router,
        }
    }

    /// The ranker used for the first step.
    pub const fn ranker(&self) -> &TravelTimeRanker<M> {
        &self.ranker
    }

    /// The routing service used for the second step.
    pub const fn router(&self) -> &R {
        &self.router
    }

    /// Rank `destinations` and build the waypoint sequence.
    ///
    /// Returns `Ok(None)` when there is nothing to visit.
    ///
    /// # Errors
    /// Propagates [`RankingError`] from the ranker.
    pub async fn plan(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Option<RouteWaypoints>, RankingError> {
        if destinations.is_empty() {
            return Ok(None);
        }
        let ranked = self.ranker.rank(origin, destinations).await?;
        Ok(Some(RouteWaypoints::from_ranking(origin, &ranked)))
    }

    /// Recompute the route for `origin` and `destinations`.
    ///
    /// Returns `Ok(None)` ("no path") for an empty destination list without
    /// contacting either service.
    ///
    /// # Errors
    /// Returns [`RecomputeError::RankingFailed`] when ranking fails, in which
    /// case no route request is issued, and
    /// [`RecomputeError::RouteComputationFailed`] when the routing request
    /// fails or yields no drawable geometry.
    pub async fn recompute(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Option<ComputedRoute>, RecomputeError> {
        let Some(waypoints) = self.plan(origin, destinations).await? else {
            return Ok(None);
        };

        debug!("requesting route through {} waypoints", waypoints.len());
        let path = self.router.route(&to_points(&waypoints.to_vec())).await?;
        if !path.is_renderable() {
            return Err(RouteError::NoRoute.into());
        }

        Ok(Some(ComputedRoute { waypoints, path }))
    }
}
