//! GeoJSON rendering of a delivery session.

use dropwise_core::{Coordinate, MarkerHandle, RenderSink, RoutePath};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

/// A [`RenderSink`] that keeps the latest map state and renders it as a
/// GeoJSON `FeatureCollection`.
///
/// Features are emitted in a fixed order: the origin, then destination
/// markers in click order, then the route line when one has been drawn.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonSink {
    origin: Option<Coordinate>,
    markers: Vec<(MarkerHandle, Coordinate)>,
    path: Option<RoutePath>,
    next_marker: u64,
}

impl GeoJsonSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The origin marker's position, if one has been placed.
    #[must_use]
    pub const fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    /// Destination markers in the order they were placed.
    #[must_use]
    pub fn markers(&self) -> &[(MarkerHandle, Coordinate)] {
        &self.markers
    }

    /// The route currently drawn.
    #[must_use]
    pub const fn path(&self) -> Option<&RoutePath> {
        self.path.as_ref()
    }

    /// Render the current state as a feature collection.
    #[must_use]
    pub fn to_geojson(&self) -> GeoJson {
        let origin = self
            .origin
            .map(|coordinate| point_feature(coordinate, properties("origin")));
        let destinations = self.markers.iter().map(|&(handle, coordinate)| {
            let mut props = properties("destination");
            props.insert("marker".to_owned(), JsonValue::from(handle.0));
            point_feature(coordinate, props)
        });
        let route = self.path.as_ref().map(route_feature);

        let features = origin
            .into_iter()
            .chain(destinations)
            .chain(route)
            .collect();
        GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

impl RenderSink for GeoJsonSink {
    fn replace_path(&mut self, path: &RoutePath) {
        self.path = Some(path.clone());
    }

    fn add_marker(&mut self, coordinate: Coordinate) -> MarkerHandle {
        let handle = MarkerHandle(self.next_marker);
        self.next_marker += 1;
        self.markers.push((handle, coordinate));
        handle
    }

    fn place_origin(&mut self, coordinate: Coordinate) {
        self.origin = Some(coordinate);
    }
}

fn position(coordinate: Coordinate) -> Vec<f64> {
    vec![coordinate.longitude(), coordinate.latitude()]
}

fn properties(role: &str) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("role".to_owned(), JsonValue::from(role));
    props
}

fn feature(value: Value, props: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn point_feature(coordinate: Coordinate, props: JsonObject) -> Feature {
    feature(Value::Point(position(coordinate)), props)
}

fn route_feature(path: &RoutePath) -> Feature {
    let mut props = properties("route");
    props.insert(
        "distance_metres".to_owned(),
        JsonValue::from(path.distance_metres()),
    );
    props.insert(
        "duration_seconds".to_owned(),
        JsonValue::from(path.duration().as_secs_f64()),
    );
    feature(
        Value::LineString(path.coordinates().map(position).collect()),
        props,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;
    use rstest::rstest;
    use serde_json::json;
    use std::time::Duration;

    fn features(sink: &GeoJsonSink) -> Vec<serde_json::Value> {
        let GeoJson::FeatureCollection(collection) = sink.to_geojson() else {
            panic!("expected a feature collection");
        };
        collection
            .features
            .into_iter()
            .map(|feature| serde_json::to_value(feature).expect("feature serialises"))
            .collect()
    }

    #[rstest]
    fn empty_sink_renders_empty_collection() {
        assert!(features(&GeoJsonSink::new()).is_empty());
    }

    #[rstest]
    fn markers_get_sequential_handles() {
        let mut sink = GeoJsonSink::new();
        let first = sink.add_marker(Coordinate::new(3.2, 101.7));
        let second = sink.add_marker(Coordinate::new(3.05, 101.75));

        assert_eq!(first, MarkerHandle(0));
        assert_eq!(second, MarkerHandle(1));
        assert_eq!(sink.markers().len(), 2);
    }

    #[rstest]
    fn features_list_origin_markers_then_route() {
        let mut sink = GeoJsonSink::new();
        sink.place_origin(Coordinate::new(3.158101, 101.711018));
        sink.add_marker(Coordinate::new(3.2, 101.7));
        sink.replace_path(
            &RoutePath::new(LineString::from(vec![(101.711018, 3.158101), (101.7, 3.2)]))
                .with_summary(1_500.0, Duration::from_secs(90)),
        );

        let rendered = features(&sink);

        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0]["properties"], json!({ "role": "origin" }));
        assert_eq!(
            rendered[0]["geometry"]["coordinates"],
            json!([101.711018, 3.158101])
        );
        assert_eq!(
            rendered[1]["properties"],
            json!({ "role": "destination", "marker": 0 })
        );
        assert_eq!(rendered[2]["geometry"]["type"], json!("LineString"));
        assert_eq!(
            rendered[2]["properties"],
            json!({ "role": "route", "distance_metres": 1500.0, "duration_seconds": 90.0 })
        );
    }

    #[rstest]
    fn replacing_the_path_keeps_one_route_feature() {
        let mut sink = GeoJsonSink::new();
        let path = RoutePath::new(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        sink.replace_path(&path);
        sink.replace_path(&path);

        let routes = features(&sink)
            .into_iter()
            .filter(|feature| feature["properties"]["role"] == "route")
            .count();
        assert_eq!(routes, 1);
    }
}
