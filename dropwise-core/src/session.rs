//! Per-map state tying clicks, the origin and the render sink together.
//!
//! A [`DeliverySession`] lives as long as the map. It owns the origin, the
//! destination registry and the injected [`RenderSink`], and recomputes the
//! route from scratch on every click or origin move.
//!
//! Recomputations may overlap: a second click can arrive while the first
//! one's service calls are still pending. Each recomputation takes a ticket
//! before its first suspension point and only the holder of the latest ticket
//! may touch the sink, so the last click wins regardless of which response
//! arrives last.

use std::cell::{Cell, Ref, RefCell};

use log::{debug, warn};
use thiserror::Error;

use crate::{
    ComputedRoute, Coordinate, CoordinateError, DestinationRegistry, RecomputeError, RenderSink,
    RouteRecomputationEngine, RouteService, TravelTimeService,
};

/// What happened to a recomputation.
#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeOutcome {
    /// A route was computed and handed to the sink.
    Rendered(ComputedRoute),
    /// There are no destinations, so nothing was routed or drawn.
    NoDestinations,
    /// A newer recomputation started while this one was in flight. Its result
    /// was discarded and the sink was left untouched.
    Superseded {
        /// Ticket held by this recomputation.
        ticket: u64,
        /// Latest ticket issued when this one completed.
        latest: u64,
    },
}

/// Errors returned by session events.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The event carried an out-of-range coordinate and was ignored.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
    /// The recomputation triggered by the event failed.
    #[error(transparent)]
    Recompute(#[from] RecomputeError),
}

/// Explicit state object for one interactive map.
///
/// Interior mutability keeps every event handler on `&self` so overlapping
/// events can be driven concurrently on a single-threaded executor. No borrow
/// is held across an `.await`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use dropwise_core::{Coordinate, DeliverySession, RecomputeOutcome, RouteRecomputationEngine};
/// use dropwise_core::test_support::{RecordingSink, StubRouteService, StubTravelTimeService};
///
/// let engine = RouteRecomputationEngine::new(
///     StubTravelTimeService::with_durations(vec![Duration::from_secs(60)]),
///     StubRouteService::straight_lines(),
/// );
/// let origin = Coordinate::new(3.158101, 101.711018);
/// let session = DeliverySession::new(origin, engine, RecordingSink::default());
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let outcome = runtime.block_on(session.click(Coordinate::new(3.10, 101.60)))?;
/// assert!(matches!(outcome, RecomputeOutcome::Rendered(_)));
/// assert_eq!(session.sink().visible_path_layers(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DeliverySession<M, R, S> {
    engine: RouteRecomputationEngine<M, R>,
    origin: Cell<Coordinate>,
    registry: RefCell<DestinationRegistry>,
    latest_ticket: Cell<u64>,
    sink: RefCell<S>,
}

impl<M, R, S> DeliverySession<M, R, S>
where
    M: TravelTimeService,
    R: RouteService,
    S: RenderSink,
{
    /// Start a session at `origin`, placing the origin marker on `sink`.
    pub fn new(origin: Coordinate, engine: RouteRecomputationEngine<M, R>, mut sink: S) -> Self {
        sink.place_origin(origin);
        Self {
            engine,
            origin: Cell::new(origin),
            registry: RefCell::new(DestinationRegistry::new()),
            latest_ticket: Cell::new(0),
            sink: RefCell::new(sink),
        }
    }

    /// Current origin.
    pub fn origin(&self) -> Coordinate {
        self.origin.get()
    }

    /// Snapshot of the destinations in click order.
    pub fn destinations(&self) -> Vec<Coordinate> {
        self.registry.borrow().snapshot()
    }

    /// Borrow the render sink.
    ///
    /// # Panics
    /// Panics if called while the session is drawing, which only happens
    /// when a sink calls back into its own session.
    pub fn sink(&self) -> Ref<'_, S> {
        self.sink.borrow()
    }

    /// The engine used for recomputations.
    pub const fn engine(&self) -> &RouteRecomputationEngine<M, R> {
        &self.engine
    }

    /// Consume the session and return the sink.
    pub fn into_sink(self) -> S {
        self.sink.into_inner()
    }

    /// Handle a map click at `coordinate`.
    ///
    /// The click is recorded and marked before the route is recomputed, so it
    /// is kept even when the recomputation fails.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidCoordinate`] without recording anything
    /// when `coordinate` is out of range, and [`SessionError::Recompute`] when
    /// the current recomputation fails.
    pub async fn click(&self, coordinate: Coordinate) -> Result<RecomputeOutcome, SessionError> {
        let destination = coordinate.validate()?;
        self.registry.borrow_mut().append(destination);
        self.sink.borrow_mut().add_marker(destination);
        self.recompute().await
    }

    /// Move the origin to `coordinate` and re-rank every destination from it.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidCoordinate`] leaving the origin in place
    /// when `coordinate` is out of range, and [`SessionError::Recompute`] when
    /// the current recomputation fails.
    pub async fn relocate_origin(
        &self,
        coordinate: Coordinate,
    ) -> Result<RecomputeOutcome, SessionError> {
        let origin = coordinate.validate()?;
        self.origin.set(origin);
        self.sink.borrow_mut().place_origin(origin);
        self.recompute().await
    }

    /// Recompute the route for the current origin and destinations.
    ///
    /// # Errors
    /// Returns [`SessionError::Recompute`] when this recomputation is still
    /// the latest and it fails.
    pub async fn recompute(&self) -> Result<RecomputeOutcome, SessionError> {
        let ticket = self.latest_ticket.get().wrapping_add(1);
        self.latest_ticket.set(ticket);
        let origin = self.origin.get();
        let destinations = self.registry.borrow().snapshot();

        let result = self.engine.recompute(origin, &destinations).await;

        let latest = self.latest_ticket.get();
        if ticket != latest {
            debug!("discarding recomputation {ticket}; {latest} is newer");
            return Ok(RecomputeOutcome::Superseded { ticket, latest });
        }

        match result {
            Ok(Some(route)) => {
                self.sink.borrow_mut().replace_path(&route.path);
                Ok(RecomputeOutcome::Rendered(route))
            }
            Ok(None) => Ok(RecomputeOutcome::NoDestinations),
            Err(err) => {
                warn!("route recomputation failed: {err}");
                Err(err.into())
            }
        }
    }
}
