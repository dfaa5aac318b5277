//! Travel-time service trait for one-to-many matrix queries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use geo::Point;

use super::error::TravelTimeError;

/// Fetch travel times from one origin to many destinations.
///
/// Implementers must return exactly one duration per destination, in the
/// order the destinations were supplied. Unreachable destinations are
/// reported as [`Duration::MAX`]. Callers check the length of the result and
/// treat a mismatch as a malformed response.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use geo::Point;
/// use dropwise_core::{TravelTimeError, TravelTimeService};
///
/// struct UnitService;
///
/// #[async_trait]
/// impl TravelTimeService for UnitService {
///     async fn travel_times(
///         &self,
///         _origin: Point<f64>,
///         destinations: &[Point<f64>],
///     ) -> Result<Vec<Duration>, TravelTimeError> {
///         if destinations.is_empty() {
///             return Err(TravelTimeError::EmptyInput);
///         }
///         Ok(vec![Duration::from_secs(1); destinations.len()])
///     }
/// }
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let times = runtime.block_on(
///     UnitService.travel_times(Point::new(0.0, 0.0), &[Point::new(1.0, 1.0)]),
/// )?;
/// assert_eq!(times, vec![Duration::from_secs(1)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[async_trait]
pub trait TravelTimeService: Send + Sync {
    /// Return the travel time from `origin` to each of `destinations`.
    ///
    /// Implementations must return `Err(TravelTimeError::EmptyInput)` when
    /// `destinations` is empty.
    async fn travel_times(
        &self,
        origin: Point<f64>,
        destinations: &[Point<f64>],
    ) -> Result<Vec<Duration>, TravelTimeError>;
}

#[async_trait]
impl<T> TravelTimeService for &T
where
    T: TravelTimeService + ?Sized,
{
    async fn travel_times(
        &self,
        origin: Point<f64>,
        destinations: &[Point<f64>],
    ) -> Result<Vec<Duration>, TravelTimeError> {
        (**self).travel_times(origin, destinations).await
    }
}

#[async_trait]
impl<T> TravelTimeService for Arc<T>
where
    T: TravelTimeService + ?Sized,
{
    async fn travel_times(
        &self,
        origin: Point<f64>,
        destinations: &[Point<f64>],
    ) -> Result<Vec<Duration>, TravelTimeError> {
        (**self).travel_times(origin, destinations).await
    }
}

#[async_trait]
impl<T> TravelTimeService for Box<T>
where
    T: TravelTimeService + ?Sized,
{
    async fn travel_times(
        &self,
        origin: Point<f64>,
        destinations: &[Point<f64>],
    ) -> Result<Vec<Duration>, TravelTimeError> {
        (**self).travel_times(origin, destinations).await
    }
}
