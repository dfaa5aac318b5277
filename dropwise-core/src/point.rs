//! Conversion between [`Coordinate`] values and the point representation
//! understood by the matrix and routing services.
//!
//! Services receive [`geo::Point`] values with `x = longitude` and
//! `y = latitude`. The conversion is pure and total: out-of-range input is
//! passed through unchanged and left for the service to reject.

use geo::Point;

use crate::Coordinate;

/// Convert a coordinate into a service point.
///
/// # Examples
/// ```
/// use dropwise_core::{Coordinate, point::to_point};
///
/// let point = to_point(Coordinate::new(3.2, 101.7));
/// assert_eq!(point.x(), 101.7);
/// assert_eq!(point.y(), 3.2);
/// ```
#[must_use]
pub fn to_point(coordinate: Coordinate) -> Point<f64> {
    Point::from(geo::Coord::from(coordinate))
}

/// Convert a sequence of coordinates, preserving order.
#[must_use]
pub fn to_points(coordinates: &[Coordinate]) -> Vec<Point<f64>> {
    coordinates.iter().copied().map(to_point).collect()
}

/// Convert a service point back into a coordinate.
#[must_use]
pub fn from_point(point: Point<f64>) -> Coordinate {
    Coordinate::from(point.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn passes_out_of_range_values_through() {
        let point = to_point(Coordinate::new(123.0, -500.0));
        assert_eq!(point.y(), 123.0);
        assert_eq!(point.x(), -500.0);
    }

    #[rstest]
    fn preserves_sequence_order() {
        let coordinates = [
            Coordinate::new(1.0, 2.0),
            Coordinate::new(3.0, 4.0),
            Coordinate::new(1.0, 2.0),
        ];
        let points = to_points(&coordinates);
        let back: Vec<Coordinate> = points.into_iter().map(from_point).collect();
        assert_eq!(back, coordinates);
    }
}
