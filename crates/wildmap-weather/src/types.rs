use serde::{Deserialize, Serialize};
use wildmap_core::{AppError, NetworkError, ReqwestErrorExt};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A resolved place search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coordinate: Coordinate,
    pub display_name: String,
}

/// Fallback text for sunrise/sunset when the daily series is missing
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalized weather and air-quality reading for one coordinate.
///
/// Every numeric field is independently absent when the upstream
/// response omitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub coordinate: Coordinate,
    /// IANA zone resolved by the provider, empty when not reported
    pub timezone: String,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub uv_index: Option<f64>,
    pub sunrise: String,
    pub sunset: String,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
}

/// Which upstream endpoint a forecast request targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastService {
    Weather,
    AirQuality,
}

impl std::fmt::Display for ForecastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weather => write!(f, "Weather"),
            Self::AirQuality => write!(f, "Air quality"),
        }
    }
}

/// Location service errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("{0}")]
    PermissionDenied(String),
    #[error("Geolocation not supported")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

/// Forecast provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{service} fetch failed: {status} {reason}")]
    Status {
        service: ForecastService,
        status: u16,
        reason: String,
    },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Place search errors
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Please enter a place name or address.")]
    EmptyQuery,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Geocode fetch failed: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Network(inner) => AppError::Transport(inner.into_network_error()),
            WeatherError::Status {
                service,
                status,
                reason,
            } => AppError::Transport(NetworkError::ServerError {
                status,
                message: format!("{service}: {reason}"),
            }),
            WeatherError::Parse(msg) => AppError::Transport(NetworkError::InvalidResponse(msg)),
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::EmptyQuery => {
                AppError::Validation(GeocodeError::EmptyQuery.to_string())
            }
            GeocodeError::Network(inner) => AppError::Transport(inner.into_network_error()),
            GeocodeError::Status { status, reason } => {
                AppError::Transport(NetworkError::ServerError {
                    status,
                    message: reason,
                })
            }
            GeocodeError::Parse(msg) => AppError::Transport(NetworkError::InvalidResponse(msg)),
        }
    }
}

impl From<LocationError> for AppError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::PermissionDenied(reason) => AppError::PermissionDenied(reason),
            LocationError::Timeout => AppError::Transport(NetworkError::Timeout),
            other => AppError::Other(anyhow::anyhow!(other.to_string())),
        }
    }
}
