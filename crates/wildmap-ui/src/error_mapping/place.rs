use crate::services::PlaceError;
use wildmap_core::{AppError, NetworkError};

impl From<PlaceError> for AppError {
    fn from(e: PlaceError) -> Self {
        match e {
            PlaceError::EmptyQuery => AppError::Validation(PlaceError::EmptyQuery.to_string()),
            PlaceError::Search(s) => AppError::Transport(NetworkError::ConnectionFailed(s)),
            PlaceError::PermissionDenied(s) => AppError::PermissionDenied(s),
            PlaceError::Unsupported => {
                AppError::PermissionDenied(PlaceError::Unsupported.to_string())
            }
            PlaceError::Timeout => AppError::Transport(NetworkError::Timeout),
            // Position unavailable
            PlaceError::Location(s) => AppError::Other(anyhow::anyhow!(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildmap_core::ErrorKind;
    use wildmap_weather::LocationError;

    #[test]
    fn test_location_failures_are_not_not_found() {
        let timeout = AppError::from(PlaceError::from(LocationError::Timeout));
        assert!(matches!(timeout, AppError::Transport(NetworkError::Timeout)));

        let unavailable = AppError::from(PlaceError::from(LocationError::Other(
            "Position unavailable".into(),
        )));
        assert_eq!(unavailable.kind(), ErrorKind::Internal);
        assert_eq!(unavailable.to_string(), "Position unavailable");
    }

    #[test]
    fn test_denied_location_is_permission_error() {
        let denied = AppError::from(PlaceError::from(LocationError::PermissionDenied(
            "User denied Geolocation".into(),
        )));
        assert_eq!(denied.kind(), ErrorKind::PermissionDenied);
        assert_eq!(denied.user_message(), "Location access was denied.");
    }
}
