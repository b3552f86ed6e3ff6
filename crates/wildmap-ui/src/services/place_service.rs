//! Place backend: forward geocoding and the device position.

use std::sync::Arc;

use tokio::runtime::Handle;
use wildmap_weather::{Coordinate, GeocodeError, LocationError, Place};

use super::{UiMessage, UiSender};
use crate::ports::{LocationSource, PlaceSearch};

/// Error type for place operations
#[derive(Debug, Clone)]
pub enum PlaceError {
    EmptyQuery,
    Search(String),
    PermissionDenied(String),
    Unsupported,
    Timeout,
    Location(String),
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceError::EmptyQuery => write!(f, "{}", GeocodeError::EmptyQuery),
            PlaceError::Search(s) => f.write_str(s),
            PlaceError::PermissionDenied(s) => f.write_str(s),
            PlaceError::Unsupported => write!(f, "{}", LocationError::ServiceUnavailable),
            PlaceError::Timeout => write!(f, "{}", LocationError::Timeout),
            PlaceError::Location(s) => f.write_str(s),
        }
    }
}

impl std::error::Error for PlaceError {}

impl From<GeocodeError> for PlaceError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::EmptyQuery => PlaceError::EmptyQuery,
            other => PlaceError::Search(other.to_string()),
        }
    }
}

impl From<LocationError> for PlaceError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::PermissionDenied(reason) => PlaceError::PermissionDenied(reason),
            LocationError::ServiceUnavailable => PlaceError::Unsupported,
            LocationError::Timeout => PlaceError::Timeout,
            other => PlaceError::Location(other.to_string()),
        }
    }
}

#[derive(Debug)]
pub enum PlaceServiceMessage {
    /// Result of a place search; `Ok(None)` when nothing matched
    SearchDone(Result<Option<Place>, PlaceError>),
    /// Result of asking for the device position
    LocateDone(Result<Coordinate, PlaceError>),
}

/// Request a place search for `query`.
/// Sends `SearchDone` on the channel when complete.
pub fn request_search(
    tx: &UiSender,
    runtime: &Handle,
    search: Arc<dyn PlaceSearch>,
    query: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = search.search(&query).await.map_err(PlaceError::from);
        let _ = tx.send(UiMessage::Place(PlaceServiceMessage::SearchDone(result)));
    });
}

/// Request the device position.
/// Sends `LocateDone` on the channel when complete.
pub fn request_locate(tx: &UiSender, runtime: &Handle, location: Arc<dyn LocationSource>) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = location.locate().await.map_err(PlaceError::from);
        if let Ok(coordinate) = &result {
            tracing::info!("Got location: {}", coordinate);
        }
        let _ = tx.send(UiMessage::Place(PlaceServiceMessage::LocateDone(result)));
    });
}
