use crate::services::ForecastError;
use wildmap_core::{AppError, NetworkError};

impl From<ForecastError> for AppError {
    fn from(e: ForecastError) -> Self {
        match e {
            ForecastError::Request(s) => AppError::Transport(NetworkError::ConnectionFailed(s)),
            ForecastError::Response(s) => AppError::Transport(NetworkError::InvalidResponse(s)),
        }
    }
}
