//! Interface the map widget offers for drawing routes and markers.

use crate::{Coordinate, RoutePath};

/// Identifier of a marker placed by a [`RenderSink`].
///
/// The engine never keeps handles; marker lifecycle after placement belongs
/// to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerHandle(pub u64);

/// Drawing surface for routes and markers.
///
/// Implementations are supplied by the map widget and injected into a
/// [`DeliverySession`](crate::DeliverySession).
pub trait RenderSink {
    /// Replace the drawn route with `path`.
    ///
    /// Any previously drawn path must be removed before the new one is added,
    /// so at most one path is visible at a time. Replacing with an identical
    /// path must leave the map in an identical state.
    fn replace_path(&mut self, path: &RoutePath);

    /// Place a delivery marker at `coordinate`.
    fn add_marker(&mut self, coordinate: Coordinate) -> MarkerHandle;

    /// Move the origin marker to `coordinate`.
    ///
    /// Called when a session starts and whenever the origin is relocated.
    /// The default does nothing.
    fn place_origin(&mut self, coordinate: Coordinate) {
        let _ = coordinate;
    }
}

impl<S> RenderSink for &mut S
where
    S: RenderSink + ?Sized,
{
    fn replace_path(&mut self, path: &RoutePath) {
        (**self).replace_path(path);
    }

    fn add_marker(&mut self, coordinate: Coordinate) -> MarkerHandle {
        (**self).add_marker(coordinate)
    }

    fn place_origin(&mut self, coordinate: Coordinate) {
        (**self).place_origin(coordinate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;

    use crate::test_support::RecordingSink;

    fn path(points: Vec<(f64, f64)>) -> RoutePath {
        RoutePath::new(LineString::from(points))
    }

    #[test]
    fn replacing_twice_keeps_one_visible_path() {
        let mut sink = RecordingSink::default();
        sink.replace_path(&path(vec![(0.0, 0.0), (1.0, 1.0)]));
        sink.replace_path(&path(vec![(0.0, 0.0), (2.0, 2.0)]));
        assert_eq!(sink.visible_path_layers(), 1);
        assert_eq!(sink.path(), Some(&path(vec![(0.0, 0.0), (2.0, 2.0)])));
    }

    #[test]
    fn replacing_with_identical_path_is_idempotent() {
        let route = path(vec![(0.0, 0.0), (1.0, 1.0)]);
        let mut once = RecordingSink::default();
        once.replace_path(&route);
        let mut twice = RecordingSink::default();
        twice.replace_path(&route);
        twice.replace_path(&route);
        assert_eq!(once.path(), twice.path());
        assert_eq!(once.visible_path_layers(), twice.visible_path_layers());
    }

    #[test]
    fn markers_get_distinct_handles() {
        let mut sink = RecordingSink::default();
        let first = sink.add_marker(Coordinate::new(1.0, 1.0));
        let second = sink.add_marker(Coordinate::new(1.0, 1.0));
        assert_ne!(first, second);
        assert_eq!(sink.markers().len(), 2);
    }

    fn draw<S: RenderSink>(mut sink: S, origin: Coordinate, stop: Coordinate) -> MarkerHandle {
        sink.place_origin(origin);
        let handle = sink.add_marker(stop);
        sink.replace_path(&path(vec![
            (origin.longitude(), origin.latitude()),
            (stop.longitude(), stop.latitude()),
        ]));
        handle
    }

    #[test]
    fn mutable_references_forward_calls() {
        let origin = Coordinate::new(3.0, 101.0);
        let stop = Coordinate::new(3.1, 101.1);
        let mut sink = RecordingSink::default();

        let first = draw(&mut sink, origin, stop);
        let second = draw(&mut sink, origin, stop);

        assert_ne!(first, second);
        assert_eq!(sink.origin(), Some(origin));
        assert_eq!(sink.markers(), &[stop, stop]);
        assert_eq!(sink.visible_path_layers(), 1);
        assert_eq!(
            sink.path(),
            Some(&path(vec![(101.0, 3.0), (101.1, 3.1)]))
        );
    }
}
