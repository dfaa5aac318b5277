//! Shared configuration for the OSRM services.

use std::time::Duration;

use geo::Point;
use reqwest::Client;
use thiserror::Error;

/// Default OSRM base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "dropwise-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error building an OSRM service.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Configuration shared by [`OsrmTravelTimeService`] and [`OsrmRouteService`].
///
/// [`OsrmTravelTimeService`]: super::OsrmTravelTimeService
/// [`OsrmRouteService`]: super::OsrmRouteService
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmServiceConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Routing profile appended to every request path (e.g., `"driving"`).
    pub profile: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmServiceConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build an HTTP client honouring the timeout and user agent.
    pub(crate) fn build_client(&self) -> Result<Client, ProviderBuildError> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)
    }

    /// Build `{base_url}/{service}/v1/{profile}/{lon,lat;...}`.
    pub(crate) fn service_url(&self, service: &str, points: &[Point<f64>]) -> String {
        format!(
            "{}/{service}/v1/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.profile,
            coordinate_list(points)
        )
    }
}

/// Format points as OSRM's semicolon-separated `lon,lat` list.
fn coordinate_list(points: &[Point<f64>]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(";")
}
