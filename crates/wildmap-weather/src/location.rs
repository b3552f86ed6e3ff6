//! Device location behind a permission gate.
//!
//! A server-side process has no browser prompt, so the device position is
//! whatever the operator configured. Absent configuration behaves like a
//! platform without geolocation support.

use crate::types::{Coordinate, LocationError};
use wildmap_core::LocationConfig;

#[derive(Debug, Clone)]
pub enum DeviceLocation {
    /// Permission granted, position known
    Fixed(Coordinate),
    /// The user refused the permission prompt
    Denied(String),
    /// No geolocation capability
    Unavailable,
}

impl DeviceLocation {
    pub fn from_config(config: Option<&LocationConfig>) -> Self {
        match config {
            Some(loc) => Self::Fixed(Coordinate::new(loc.latitude, loc.longitude)),
            None => Self::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    pub async fn current_location(&self) -> Result<Coordinate, LocationError> {
        match self {
            Self::Fixed(coordinate) if coordinate.is_valid() => Ok(*coordinate),
            Self::Fixed(coordinate) => Err(LocationError::Other(format!(
                "Position unavailable: {coordinate}"
            ))),
            Self::Denied(reason) => Err(LocationError::PermissionDenied(reason.clone())),
            Self::Unavailable => Err(LocationError::ServiceUnavailable),
        }
    }
}
