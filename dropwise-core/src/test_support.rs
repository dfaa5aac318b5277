//! Deterministic service doubles and a recording render sink.
//!
//! These types let unit, behaviour and downstream crate tests drive the
//! ranking and routing pipeline without a running OSRM instance.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, LineString, Point};

use crate::{
    Coordinate, MarkerHandle, RenderSink, RouteError, RoutePath, RouteService, TravelTimeError,
    TravelTimeService, point::from_point,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
enum MatrixResponse {
    Durations(Vec<Duration>),
    Table(Vec<(Coordinate, Duration)>),
    Error(TravelTimeError),
}

/// Stub [`TravelTimeService`] returning pre-configured answers.
///
/// Every non-empty request is recorded so tests can assert on what was sent.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Point;
/// use dropwise_core::TravelTimeService;
/// use dropwise_core::test_support::StubTravelTimeService;
///
/// let service = StubTravelTimeService::with_durations(vec![Duration::from_secs(60)]);
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let times = runtime.block_on(
///     service.travel_times(Point::new(0.0, 0.0), &[Point::new(1.0, 1.0)]),
/// )?;
/// assert_eq!(times, vec![Duration::from_secs(60)]);
/// assert_eq!(service.request_count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StubTravelTimeService {
    response: Mutex<MatrixResponse>,
    requests: Mutex<Vec<(Point<f64>, Vec<Point<f64>>)>>,
}

impl StubTravelTimeService {
    fn from_response(response: MatrixResponse) -> Self {
        Self {
            response: Mutex::new(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `durations`, whatever the destinations.
    #[must_use]
    pub fn with_durations(durations: Vec<Duration>) -> Self {
        Self::from_response(MatrixResponse::Durations(durations))
    }

    /// Answer every non-empty request with `error`.
    #[must_use]
    pub fn with_error(error: TravelTimeError) -> Self {
        Self::from_response(MatrixResponse::Error(error))
    }

    /// Look travel times up per destination.
    ///
    /// Destinations missing from `table` are reported unreachable
    /// ([`Duration::MAX`]).
    #[must_use]
    pub fn from_table<I>(table: I) -> Self
    where
        I: IntoIterator<Item = (Coordinate, Duration)>,
    {
        Self::from_response(MatrixResponse::Table(table.into_iter().collect()))
    }

    /// Make subsequent requests fail with `error`.
    pub fn fail_with(&self, error: TravelTimeError) {
        *lock(&self.response) = MatrixResponse::Error(error);
    }

    /// Make subsequent requests use `table` lookups.
    pub fn answer_from_table<I>(&self, table: I)
    where
        I: IntoIterator<Item = (Coordinate, Duration)>,
    {
        *lock(&self.response) = MatrixResponse::Table(table.into_iter().collect());
    }

    /// Every request received, as `(origin, destinations)` pairs.
    #[must_use]
    pub fn requests(&self) -> Vec<(Point<f64>, Vec<Point<f64>>)> {
        lock(&self.requests).clone()
    }

    /// Number of requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

fn lookup(table: &[(Coordinate, Duration)], destination: Point<f64>) -> Duration {
    let wanted = from_point(destination);
    table
        .iter()
        .find(|(coordinate, _)| *coordinate == wanted)
        .map_or(Duration::MAX, |(_, duration)| *duration)
}

#[async_trait]
impl TravelTimeService for StubTravelTimeService {
    async fn travel_times(
        &self,
        origin: Point<f64>,
        destinations: &[Point<f64>],
    ) -> Result<Vec<Duration>, TravelTimeError> {
        if destinations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        lock(&self.requests).push((origin, destinations.to_vec()));

        match &*lock(&self.response) {
            MatrixResponse::Durations(durations) => Ok(durations.clone()),
            MatrixResponse::Table(table) => Ok(destinations
                .iter()
                .map(|destination| lookup(table, *destination))
                .collect()),
            MatrixResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[derive(Debug, Clone)]
enum RouteResponse {
    StraightLines,
    Path(RoutePath),
    Error(RouteError),
}

/// Stub [`RouteService`] recording the waypoints it receives.
#[derive(Debug)]
pub struct StubRouteService {
    response: Mutex<RouteResponse>,
    requests: Mutex<Vec<Vec<Point<f64>>>>,
}

impl StubRouteService {
    fn from_response(response: RouteResponse) -> Self {
        Self {
            response: Mutex::new(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer with a path joining the waypoints by straight segments.
    #[must_use]
    pub fn straight_lines() -> Self {
        Self::from_response(RouteResponse::StraightLines)
    }

    /// Answer every request with `path`.
    #[must_use]
    pub fn with_path(path: RoutePath) -> Self {
        Self::from_response(RouteResponse::Path(path))
    }

    /// Answer every request with `error`.
    #[must_use]
    pub fn with_error(error: RouteError) -> Self {
        Self::from_response(RouteResponse::Error(error))
    }

    /// Make subsequent requests fail with `error`.
    pub fn fail_with(&self, error: RouteError) {
        *lock(&self.response) = RouteResponse::Error(error);
    }

    /// Waypoint sequences received, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<Point<f64>>> {
        lock(&self.requests).clone()
    }

    /// Number of requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

/// Join `waypoints` with straight segments.
#[must_use]
pub fn straight_path(waypoints: &[Point<f64>]) -> RoutePath {
    let coords: Vec<Coord<f64>> = waypoints.iter().map(|point| point.0).collect();
    RoutePath::new(LineString::new(coords))
}

#[async_trait]
impl RouteService for StubRouteService {
    async fn route(&self, waypoints: &[Point<f64>]) -> Result<RoutePath, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }
        lock(&self.requests).push(waypoints.to_vec());

        match &*lock(&self.response) {
            RouteResponse::StraightLines => Ok(straight_path(waypoints)),
            RouteResponse::Path(path) => Ok(path.clone()),
            RouteResponse::Error(error) => Err(error.clone()),
        }
    }
}

/// [`RenderSink`] that records everything drawn on it.
///
/// Paths are kept as layers so tests can check that a replacement never
/// leaves two routes visible.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    origin: Option<Coordinate>,
    markers: Vec<Coordinate>,
    layers: Vec<RoutePath>,
    replace_count: usize,
    next_marker: u64,
}

impl RecordingSink {
    /// Current origin marker position.
    #[must_use]
    pub const fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    /// Delivery markers in placement order.
    #[must_use]
    pub fn markers(&self) -> &[Coordinate] {
        &self.markers
    }

    /// The path currently drawn, if any.
    #[must_use]
    pub fn path(&self) -> Option<&RoutePath> {
        self.layers.last()
    }

    /// Number of path layers currently visible.
    #[must_use]
    pub fn visible_path_layers(&self) -> usize {
        self.layers.len()
    }

    /// Number of times a path was drawn.
    #[must_use]
    pub const fn replace_count(&self) -> usize {
        self.replace_count
    }
}

impl RenderSink for RecordingSink {
    fn replace_path(&mut self, path: &RoutePath) {
        self.layers.clear();
        self.layers.push(path.clone());
        self.replace_count += 1;
    }

    fn add_marker(&mut self, coordinate: Coordinate) -> MarkerHandle {
        self.markers.push(coordinate);
        let handle = MarkerHandle(self.next_marker);
        self.next_marker += 1;
        handle
    }

    fn place_origin(&mut self, coordinate: Coordinate) {
        self.origin = Some(coordinate);
    }
}
