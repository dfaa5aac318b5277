use thiserror::Error;

/// Errors from [`crate::travel_time::TravelTimeService::travel_times`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// No destinations were provided.
    ///
    /// A matrix query needs at least one destination. The ranker never issues
    /// such a request; adapters reject it defensively.
    #[error("at least one destination is required")]
    EmptyInput,

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
    #[error("matrix service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `InvalidQuery`.
        code: String,
        /// Message supplied by the service.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse matrix response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}
