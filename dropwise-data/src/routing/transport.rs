//! HTTP exchange shared by the OSRM services.

use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Why an exchange did not produce a decodable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransportFailure {
    /// The request exceeded the configured timeout.
    Timeout,
    /// The connection failed or the body could not be read.
    Network(String),
    /// The service answered with a non-success status and no OSRM error body.
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or status reason.
        message: String,
    },
    /// The body was not the expected JSON document.
    Parse(String),
}

/// An OSRM body carrying a status `code`.
pub(crate) trait OsrmBody {
    /// Whether `code` is `"Ok"`.
    fn is_ok(&self) -> bool;
}

fn classify(error: &reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        return TransportFailure::Timeout;
    }
    if let Some(status) = error.status() {
        return TransportFailure::Status {
            status: status.as_u16(),
            message: error.to_string(),
        };
    }
    TransportFailure::Network(error.to_string())
}

/// GET `url` and decode the JSON body.
///
/// OSRM reports request errors with a 4xx status and a JSON body carrying a
/// non-`Ok` code. Such bodies are returned as-is so callers can surface the
/// service code; any other non-success status is a
/// [`TransportFailure::Status`].
pub(crate) async fn get_json<T>(client: &Client, url: &str) -> Result<T, TransportFailure>
where
    T: DeserializeOwned + OsrmBody,
{
    debug!("GET {url}");
    let response = client.get(url).send().await.map_err(|err| classify(&err))?;
    let status = response.status();
    let body = response.text().await.map_err(|err| classify(&err))?;
    decode(status, &body)
}

fn decode<T>(status: StatusCode, body: &str) -> Result<T, TransportFailure>
where
    T: DeserializeOwned + OsrmBody,
{
    match serde_json::from_str::<T>(body) {
        Ok(decoded) if status.is_success() || !decoded.is_ok() => Ok(decoded),
        Ok(_) => Err(status_failure(status, body)),
        Err(_) if !status.is_success() => Err(status_failure(status, body)),
        Err(err) => Err(TransportFailure::Parse(err.to_string())),
    }
}

fn status_failure(status: StatusCode, body: &str) -> TransportFailure {
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_owned()
    } else {
        body.trim().to_owned()
    };
    TransportFailure::Status {
        status: status.as_u16(),
        message,
    }
}
