//! `RouteService` backed by OSRM's Route API.

use std::time::Duration;

use async_trait::async_trait;
use dropwise_core::{RouteError, RoutePath, RouteService};
use geo::{Coord, LineString, Point};
use reqwest::Client;

use super::config::{OsrmServiceConfig, ProviderBuildError};
use super::osrm::RouteResponse;
use super::transport::{TransportFailure, get_json};

/// Ordered multi-stop routes from an OSRM server.
///
/// Waypoints are visited exactly in the order supplied; OSRM's own trip
/// optimisation is never requested.
#[derive(Debug, Clone)]
pub struct OsrmRouteService {
    client: Client,
    config: OsrmServiceConfig,
}

impl OsrmRouteService {
    /// Create a service for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmServiceConfig::new(base_url))
    }

    /// Create a service with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: OsrmServiceConfig) -> Result<Self, ProviderBuildError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OsrmServiceConfig {
        &self.config
    }

    fn route_url(&self, waypoints: &[Point<f64>]) -> String {
        format!(
            "{}?overview=full&geometries=geojson&steps=false",
            self.config.service_url("route", waypoints)
        )
    }

    fn convert_failure(&self, failure: TransportFailure, url: &str) -> RouteError {
        match failure {
            TransportFailure::Timeout => RouteError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            },
            TransportFailure::Network(message) => RouteError::NetworkError {
                url: url.to_owned(),
                message,
            },
            TransportFailure::Status { status, message } => RouteError::HttpError {
                url: url.to_owned(),
                status,
                message,
            },
            TransportFailure::Parse(message) => RouteError::ParseError { message },
        }
    }
}

/// Negative, non-finite and out-of-range durations become zero.
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Take the first route's geometry and summary.
fn convert_response(response: RouteResponse) -> Result<RoutePath, RouteError> {
    if response.code != "Ok" {
        return Err(RouteError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response.routes.into_iter().next().ok_or(RouteError::NoRoute)?;
    let coords: Vec<Coord<f64>> = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect();

    Ok(RoutePath::new(LineString::new(coords))
        .with_summary(route.distance, seconds(route.duration)))
}

#[async_trait]
impl RouteService for OsrmRouteService {
    async fn route(&self, waypoints: &[Point<f64>]) -> Result<RoutePath, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let url = self.route_url(waypoints);
        let response: RouteResponse = get_json(&self.client, &url)
            .await
            .map_err(|failure| self.convert_failure(failure, &url))?;
        convert_response(response)
    }
}
