//! Forecast backend: weather and air quality for one coordinate.

use std::sync::Arc;

use tokio::runtime::Handle;
use wildmap_weather::{Coordinate, ForecastSnapshot, WeatherError};

use super::{UiMessage, UiSender};
use crate::ports::ForecastSource;

/// Error type for forecast operations
#[derive(Debug, Clone)]
pub enum ForecastError {
    /// Transport failure or non-success status from either endpoint
    Request(String),
    /// A response arrived but could not be decoded
    Response(String),
}

impl std::fmt::Display for ForecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastError::Request(s) | ForecastError::Response(s) => f.write_str(s),
        }
    }
}

impl std::error::Error for ForecastError {}

impl From<WeatherError> for ForecastError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Parse(_) => ForecastError::Response(e.to_string()),
            other => ForecastError::Request(other.to_string()),
        }
    }
}

#[derive(Debug)]
pub enum ForecastServiceMessage {
    /// Result of a forecast fetch tagged with its dispatch token
    FetchDone {
        token: u64,
        coordinate: Coordinate,
        result: Result<ForecastSnapshot, ForecastError>,
    },
}

/// Request a forecast for `coordinate`.
/// Sends `FetchDone` carrying `token` when complete.
pub fn request_fetch(
    tx: &UiSender,
    runtime: &Handle,
    source: Arc<dyn ForecastSource>,
    token: u64,
    coordinate: Coordinate,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        tracing::debug!("Forecast #{} for {}", token, coordinate);
        let result = source
            .forecast(coordinate)
            .await
            .map_err(ForecastError::from);
        let _ = tx.send(UiMessage::Forecast(ForecastServiceMessage::FetchDone {
            token,
            coordinate,
            result,
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildmap_weather::ForecastService;

    #[test]
    fn forecast_error_keeps_upstream_text() {
        let err = ForecastError::from(WeatherError::Status {
            service: ForecastService::Weather,
            status: 503,
            reason: "Service Unavailable".into(),
        });
        assert!(matches!(err, ForecastError::Request(_)));
        assert_eq!(err.to_string(), "Weather fetch failed: 503 Service Unavailable");
    }

    #[test]
    fn parse_failure_is_a_response_error() {
        let err = ForecastError::from(WeatherError::Parse("missing field".into()));
        assert!(matches!(err, ForecastError::Response(_)));
    }
}
