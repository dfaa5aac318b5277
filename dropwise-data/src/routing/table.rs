//! `TravelTimeService` backed by OSRM's Table API.
//!
//! One request is issued per ranking: the origin is the only source and every
//! destination is a target, so the response holds a single row.

use std::time::Duration;

use async_trait::async_trait;
use dropwise_core::{TravelTimeError, TravelTimeService};
use geo::Point;
use reqwest::Client;

use super::config::{OsrmServiceConfig, ProviderBuildError};
use super::osrm::TableResponse;
use super::transport::{TransportFailure, get_json};

/// One-to-many travel times from an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmTravelTimeService {
    client: Client,
    config: OsrmServiceConfig,
}

impl OsrmTravelTimeService {
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

    /// Build the Table API URL: origin at index 0, destinations from index 1.
    fn table_url(&self, origin: Point<f64>, destinations: &[Point<f64>]) -> String {
        let points: Vec<Point<f64>> = std::iter::once(origin)
            .chain(destinations.iter().copied())
            .collect();
        let targets = (1..=destinations.len())
            .map(|index| index.to_string())
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}?sources=0&destinations={targets}&annotations=duration",
            self.config.service_url("table", &points)
        )
    }

    fn convert_failure(&self, failure: TransportFailure, url: &str) -> TravelTimeError {
        match failure {
            TransportFailure::Timeout => TravelTimeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            },
            TransportFailure::Network(message) => TravelTimeError::NetworkError {
                url: url.to_owned(),
                message,
            },
            TransportFailure::Status { status, message } => TravelTimeError::HttpError {
                url: url.to_owned(),
                status,
                message,
            },
            TransportFailure::Parse(message) => TravelTimeError::ParseError { message },
        }
    }
}

/// Convert a one-row OSRM table into durations in destination order.
///
/// `null`, negative, NaN, infinite and out-of-range values mark unreachable
/// destinations and become [`Duration::MAX`].
fn convert_response(response: TableResponse) -> Result<Vec<Duration>, TravelTimeError> {
    if response.code != "Ok" {
        return Err(TravelTimeError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let durations = response
        .durations
        .ok_or_else(|| TravelTimeError::ParseError {
            message: "OSRM response missing durations array".to_owned(),
        })?;

    let mut rows = durations.into_iter();
    let (Some(row), None) = (rows.next(), rows.next()) else {
        return Err(TravelTimeError::ParseError {
            message: "OSRM response must contain exactly one durations row".to_owned(),
        });
    };

    Ok(row
        .into_iter()
        .map(|cell| {
            cell.and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
                .unwrap_or(Duration::MAX)
        })
        .collect())
}

#[async_trait]
impl TravelTimeService for OsrmTravelTimeService {
    async fn travel_times(
        &self,
        origin: Point<f64>,
        destinations: &[Point<f64>],
    ) -> Result<Vec<Duration>, TravelTimeError> {
        if destinations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }

        let url = self.table_url(origin, destinations);
        let response: TableResponse = get_json(&self.client, &url)
            .await
            .map_err(|failure| self.convert_failure(failure, &url))?;
        convert_response(response)
    }
}
