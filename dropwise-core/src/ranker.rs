//! Order destinations by ascending travel time from the origin.
//!
//! The ranker issues a single one-to-many matrix query per call and pairs the
//! answers with destinations by position. Sorting is stable so destinations
//! with equal travel times keep their click order, which keeps repeated
//! rankings of unchanged input identical.

use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::{
    Coordinate,
    point::{to_point, to_points},
    travel_time::{TravelTimeError, TravelTimeService},
};

/// A destination paired with its travel time from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedDestination {
    /// The destination as clicked.
    pub destination: Coordinate,
    /// Position of the destination in click order.
    pub click_index: usize,
    /// Travel time from the origin; [`Duration::MAX`] when unreachable.
    pub travel_time: Duration,
}

impl RankedDestination {
    /// Travel time expressed in seconds.
    #[must_use]
    pub fn travel_time_seconds(&self) -> f64 {
        self.travel_time.as_secs_f64()
    }
}

/// Ranking failed; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// The matrix request failed.
    #[error("travel-time matrix request failed: {0}")]
    Matrix(#[source] TravelTimeError),
    /// The matrix answered with the wrong number of travel times.
    #[error("travel-time matrix returned {actual} values for {expected} destinations")]
    SizeMismatch {
        /// Number of destinations sent.
        expected: usize,
        /// Number of travel times received.
        actual: usize,
    },
}

/// Sort destinations by travel time using a [`TravelTimeService`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use dropwise_core::{Coordinate, TravelTimeRanker};
/// use dropwise_core::test_support::StubTravelTimeService;
///
/// let service = StubTravelTimeService::with_durations(vec![
///     Duration::from_secs(800),
///     Duration::from_secs(400),
/// ]);
/// let ranker = TravelTimeRanker::new(service);
/// let origin = Coordinate::new(3.158101, 101.711018);
/// let a = Coordinate::new(3.20, 101.70);
/// let b = Coordinate::new(3.05, 101.75);
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let ranked = runtime.block_on(ranker.rank(origin, &[a, b]))?;
/// assert_eq!(ranked[0].destination, b);
/// assert_eq!(ranked[1].destination, a);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct TravelTimeRanker<M> {
    service: M,
}

impl<M> TravelTimeRanker<M>
where
    M: TravelTimeService,
{
    /// Construct a ranker backed by `service`.
    pub const fn new(service: M) -> Self {
        Self { service }
    }

    /// The matrix service used for ranking.
    pub const fn service(&self) -> &M {
        &self.service
    }

    /// Rank `destinations` by ascending travel time from `origin`.
    ///
    /// An empty slice yields an empty ranking without contacting the service.
    ///
    /// # Errors
    /// Returns [`RankingError::Matrix`] when the request fails and
    /// [`RankingError::SizeMismatch`] when the response length differs from
    /// the number of destinations.
    pub async fn rank(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<RankedDestination>, RankingError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            "requesting travel times for {} destinations",
            destinations.len()
        );
        let times = self
            .service
            .travel_times(to_point(origin), &to_points(destinations))
            .await
            .map_err(RankingError::Matrix)?;

        pair_and_sort(destinations, times)
    }
}

/// Pair destinations with travel times by position and stable-sort them.
fn pair_and_sort(
    destinations: &[Coordinate],
    times: Vec<Duration>,
) -> Result<Vec<RankedDestination>, RankingError> {
    if times.len() != destinations.len() {
        return Err(RankingError::SizeMismatch {
            expected: destinations.len(),
            actual: times.len(),
        });
    }

    let mut ranked: Vec<RankedDestination> = destinations
        .iter()
        .zip(times)
        .enumerate()
        .map(|(click_index, (&destination, travel_time))| RankedDestination {
            destination,
            click_index,
            travel_time,
        })
        .collect();
    ranked.sort_by_key(|entry| entry.travel_time);
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::test_support::StubTravelTimeService;

    #[fixture]
    fn origin() -> Coordinate {
        Coordinate::new(3.158101, 101.711018)
    }

    fn secs(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_secs).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn sorts_ascending(origin: Coordinate) {
        let destinations = [
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(3.0, 3.0),
        ];
        let ranker = TravelTimeRanker::new(StubTravelTimeService::with_durations(secs(&[
            300, 100, 200,
        ])));

        let ranked = ranker
            .rank(origin, &destinations)
            .await
            .expect("ranking succeeds");

        let order: Vec<usize> = ranked.iter().map(|r| r.click_index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(ranker.service().request_count(), 1);
        assert_eq!(ranked[0].travel_time_seconds(), 100.0);
    }

    #[rstest]
    #[tokio::test]
    async fn ties_keep_click_order(origin: Coordinate) {
        let destinations = [
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(3.0, 3.0),
        ];
        let ranker = TravelTimeRanker::new(StubTravelTimeService::with_durations(secs(&[
            60, 30, 60,
        ])));

        let first = ranker.rank(origin, &destinations).await.expect("first");
        let second = ranker.rank(origin, &destinations).await.expect("second");

        let order: Vec<usize> = first.iter().map(|r| r.click_index).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_destinations_skip_the_request(origin: Coordinate) {
        let service = StubTravelTimeService::with_durations(Vec::new());
        let ranker = TravelTimeRanker::new(&service);

        let ranked = ranker.rank(origin, &[]).await.expect("empty ranking");

        assert!(ranked.is_empty());
        assert_eq!(service.request_count(), 0);
    }

    #[rstest]
    #[case::too_few(secs(&[10]))]
    #[case::too_many(secs(&[10, 20, 30]))]
    #[tokio::test]
    async fn size_mismatch_is_an_error(origin: Coordinate, #[case] durations: Vec<Duration>) {
        let actual = durations.len();
        let ranker = TravelTimeRanker::new(StubTravelTimeService::with_durations(durations));
        let destinations = [Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)];

        let err = ranker
            .rank(origin, &destinations)
            .await
            .expect_err("mismatch must fail");

        assert_eq!(
            err,
            RankingError::SizeMismatch {
                expected: 2,
                actual
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn service_failure_is_wrapped(origin: Coordinate) {
        let failure = TravelTimeError::NetworkError {
            url: "http://example.com/table".to_owned(),
            message: "connection refused".to_owned(),
        };
        let ranker = TravelTimeRanker::new(StubTravelTimeService::with_error(failure.clone()));

        let err = ranker
            .rank(origin, &[Coordinate::new(1.0, 1.0)])
            .await
            .expect_err("service failure propagates");

        assert_eq!(err, RankingError::Matrix(failure));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_destinations_rank_last(origin: Coordinate) {
        let destinations = [Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)];
        let ranker = TravelTimeRanker::new(StubTravelTimeService::with_durations(vec![
            Duration::MAX,
            Duration::from_secs(900),
        ]));

        let ranked = ranker.rank(origin, &destinations).await.expect("ranks");

        assert_eq!(ranked[0].click_index, 1);
        assert_eq!(ranked[1].travel_time, Duration::MAX);
    }

    #[rstest]
    #[tokio::test]
    async fn sends_origin_and_destinations_as_points(origin: Coordinate) {
        let service = StubTravelTimeService::with_durations(secs(&[5]));
        let ranker = TravelTimeRanker::new(&service);
        let destination = Coordinate::new(3.05, 101.75);

        ranker.rank(origin, &[destination]).await.expect("ranks");

        let requests = service.requests();
        assert_eq!(requests.len(), 1);
        let (sent_origin, sent_destinations) = &requests[0];
        assert_eq!(*sent_origin, to_point(origin));
        assert_eq!(sent_destinations, &vec![to_point(destination)]);
    }
}
