//! Routed path geometry handed to the render sink.

use std::time::Duration;

use geo::LineString;

use crate::Coordinate;

/// The line drawn for a computed route, plus the service's route summary.
///
/// Geometry positions follow the `geo` convention: `x = longitude`,
/// `y = latitude`. A new path always replaces the previous one wholesale.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::LineString;
/// use dropwise_core::RoutePath;
///
/// let path = RoutePath::new(LineString::from(vec![(101.71, 3.15), (101.70, 3.20)]))
///     .with_summary(6_400.0, Duration::from_secs(800));
/// assert!(path.is_renderable());
/// assert_eq!(path.duration(), Duration::from_secs(800));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePath {
    geometry: LineString<f64>,
    distance_metres: f64,
    duration: Duration,
}

impl RoutePath {
    /// Construct a path from its geometry with an empty summary.
    #[must_use]
    pub const fn new(geometry: LineString<f64>) -> Self {
        Self {
            geometry,
            distance_metres: 0.0,
            duration: Duration::ZERO,
        }
    }

    /// Attach the total distance and duration reported by the service.
    #[must_use]
    pub fn with_summary(mut self, distance_metres: f64, duration: Duration) -> Self {
        self.distance_metres = distance_metres;
        self.duration = duration;
        self
    }

    /// The line geometry.
    #[must_use]
    pub const fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }

    /// Total route distance in metres, zero when unknown.
    #[must_use]
    pub const fn distance_metres(&self) -> f64 {
        self.distance_metres
    }

    /// Total route duration, zero when unknown.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Path positions as coordinates, in drawing order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.geometry.coords().copied().map(Coordinate::from)
    }

    /// Whether the geometry has enough positions to draw a line.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.geometry.0.len() >= 2
    }
}
