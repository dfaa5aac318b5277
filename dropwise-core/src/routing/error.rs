use thiserror::Error;

/// Errors from [`crate::routing::RouteService::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Fewer than two waypoints were supplied.
    #[error("a route needs at least two waypoints, got {count}")]
    TooFewWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },

    /// The request could not reach the service.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// The service reported an application-level failure.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `NoRoute`.
        code: String,
        /// Message supplied by the service.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse route response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },

    /// The service answered but returned no usable path geometry.
    #[error("routing service returned no usable path")]
    NoRoute,
}
