//! OSRM API response types for the Table and Route services.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service> and
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

use super::transport::OsrmBody;

/// OSRM Table API response.
///
/// The response contains either a duration matrix on success or an error
/// message on failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"InvalidOptions"` - Invalid option combination
    /// - `"NoTable"` - Table computation failed
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of durations in seconds, one row per source.
    ///
    /// Values are `None` when no route exists between a pair.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmBody for TableResponse {
    fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM, e.g. `"Ok"` or `"NoRoute"`.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl OsrmBody for RouteResponse {
    fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// A single route from the Route API.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Full-resolution geometry, requested as GeoJSON.
    pub geometry: LineStringGeometry,
    /// Total distance in metres.
    pub distance: f64,
    /// Total duration in seconds.
    pub duration: f64,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineStringGeometry {
    /// Positions as `[longitude, latitude]`.
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_one_to_many_table() {
        let json = r#"{
            "code": "Ok",
            "durations": [[800.0, 400.5, null]],
            "sources": [{"location": [101.711018, 3.158101]}]
        }"#;

        let response: TableResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let durations = response.durations.expect("should have durations");
        assert_eq!(durations, vec![vec![Some(800.0), Some(400.5), None]]);
    }

    #[test]
    fn deserialise_table_error() {
        let json = r#"{
            "code": "InvalidQuery",
            "message": "Coordinates are invalid"
        }"#;

        let response: TableResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.message,
            Some("Coordinates are invalid".to_owned())
        );
        assert!(response.durations.is_none());
    }

    #[test]
    fn deserialise_route_with_geojson_geometry() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[101.711018, 3.158101], [101.75, 3.05]]
                },
                "legs": [{"steps": [], "summary": "", "weight": 1.0, "duration": 321.0, "distance": 1234.5}],
                "distance": 1234.5,
                "duration": 321.0,
                "weight_name": "routability",
                "weight": 321.0
            }],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let route = response.routes.first().expect("one route");
        assert_eq!(route.geometry.coordinates.len(), 2);
        assert_eq!(route.distance, 1234.5);
        assert_eq!(route.duration, 321.0);
    }

    #[test]
    fn deserialise_route_error_without_routes() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.routes.is_empty());
    }
}
