//! Geographic coordinates supplied by map clicks and origin drags.

use geo::Coord;
use thiserror::Error;

/// Inclusive latitude range accepted by [`Coordinate::validate`].
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Inclusive longitude range accepted by [`Coordinate::validate`].
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 position expressed as latitude and longitude in degrees.
///
/// Coordinates are immutable once created. Construction never fails so that
/// out-of-range values can be passed through to the routing service
/// unchanged; call [`Coordinate::validate`] where input must be rejected
/// early.
///
/// # Examples
/// ```
/// use dropwise_core::Coordinate;
///
/// let origin = Coordinate::new(3.158101, 101.711018);
/// assert_eq!(origin.latitude(), 3.158101);
/// assert_eq!(origin.longitude(), 101.711018);
/// assert!(origin.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Errors returned by [`Coordinate::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was outside `[-90, 90]` or not a finite number.
    #[error("latitude {latitude} is outside the range [-90, 90]")]
    LatitudeOutOfRange {
        /// Rejected latitude in degrees.
        latitude: f64,
    },
    /// Longitude was outside `[-180, 180]` or not a finite number.
    #[error("longitude {longitude} is outside the range [-180, 180]")]
    LongitudeOutOfRange {
        /// Rejected longitude in degrees.
        longitude: f64,
    },
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Check both components against their valid ranges.
    ///
    /// `NaN` and infinite values are rejected because they fall outside every
    /// range.
    ///
    /// # Errors
    /// Returns [`CoordinateError::LatitudeOutOfRange`] or
    /// [`CoordinateError::LongitudeOutOfRange`] for the first offending
    /// component, latitude first.
    ///
    /// # Examples
    /// ```
    /// use dropwise_core::{Coordinate, CoordinateError};
    ///
    /// let err = Coordinate::new(91.0, 0.0).validate().unwrap_err();
    /// assert_eq!(err, CoordinateError::LatitudeOutOfRange { latitude: 91.0 });
    /// ```
    pub fn validate(self) -> Result<Self, CoordinateError> {
        if !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange {
                latitude: self.latitude,
            });
        }
        if !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange {
                longitude: self.longitude,
            });
        }
        Ok(self)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            x: coordinate.longitude,
            y: coordinate.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}
