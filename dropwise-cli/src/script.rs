//! Delivery scripts: a recorded sequence of map interactions.
//!
//! A script is a JSON document with an optional `origin` and an ordered
//! list of `events`:
//!
//! ```json
//! {
//!   "origin": { "latitude": 3.158101, "longitude": 101.711018 },
//!   "events": [
//!     { "type": "click", "latitude": 3.2, "longitude": 101.7 },
//!     { "type": "relocate_origin", "latitude": 3.1, "longitude": 101.6 }
//!   ]
//! }
//! ```

use std::io::BufReader;

use camino::Utf8Path;
use dropwise_core::Coordinate;
use serde::Deserialize;

use crate::CliError;
use crate::fs::open_utf8_file;

/// Latitude of the origin used when a script names none.
pub(crate) const DEFAULT_ORIGIN_LATITUDE: f64 = 3.158_101;
/// Longitude of the origin used when a script names none.
pub(crate) const DEFAULT_ORIGIN_LONGITUDE: f64 = 101.711_018;

/// One recorded interaction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ScriptEvent {
    /// A click on the map adding a destination.
    Click { latitude: f64, longitude: f64 },
    /// The origin moved, for example after a location fix.
    RelocateOrigin { latitude: f64, longitude: f64 },
}

/// A delivery session recorded as JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct DeliveryScript {
    #[serde(default)]
    origin: Option<Coordinate>,
    #[serde(default)]
    pub(crate) events: Vec<ScriptEvent>,
}

impl DeliveryScript {
    /// The script's origin, or the default origin when none is given.
    pub(crate) fn origin(&self) -> Coordinate {
        self.origin.unwrap_or_else(default_origin)
    }
}

pub(crate) fn default_origin() -> Coordinate {
    Coordinate::new(DEFAULT_ORIGIN_LATITUDE, DEFAULT_ORIGIN_LONGITUDE)
}

/// Loads a JSON-encoded [`DeliveryScript`] from disk.
///
/// Event coordinates are not validated here; the session rejects invalid
/// clicks one at a time so a single bad event does not abort a replay.
pub(crate) fn load_script(path: &Utf8Path) -> Result<DeliveryScript, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenScript {
        path: path.to_path_buf(),
        source,
    })?;
    let script: DeliveryScript =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseScript {
            path: path.to_path_buf(),
            source,
        })?;
    script
        .origin()
        .validate()
        .map_err(|source| CliError::InvalidOrigin {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(script)
}
