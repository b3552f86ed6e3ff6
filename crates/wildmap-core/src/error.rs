//! Centralized error types for the Wildmap application.
//!
//! This module provides a typed error hierarchy that:
//! - Classifies every failure as validation, transport, not-found or permission
//! - Provides user-friendly messages suitable for the status line
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Errors from the weather, geocode, location and annotation crates convert
/// into this type. Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing user input. No mutation was attempted.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(#[from] NetworkError),

    /// A lookup produced zero results. Not a failure of the service.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    NotFound,
    PermissionDenied,
    Storage,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Transport(_) => ErrorKind::Transport,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            AppError::Storage(_) | AppError::Io(_) => ErrorKind::Storage,
            AppError::Config(_) | AppError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Please check the highlighted fields and try again.",
            AppError::Transport(e) => e.user_message(),
            AppError::NotFound(_) => "Location not found.",
            AppError::PermissionDenied(_) => "Location access was denied.",
            AppError::Storage(_) | AppError::Io(_) => "Saving failed. Please try again.",
            AppError::Config(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Validation("species".into()),
            AppError::Transport(NetworkError::Timeout),
            AppError::NotFound("atlantis".into()),
            AppError::PermissionDenied("user refused".into()),
            AppError::Storage("disk full".into()),
            AppError::Config(ConfigError::Invalid("port".into())),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{err:?}");
        }
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(AppError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(
            AppError::Transport(NetworkError::Timeout).kind(),
            ErrorKind::Transport
        );
        assert_eq!(AppError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::PermissionDenied("x".into()).kind(),
            ErrorKind::PermissionDenied
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(AppError::from(io).kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_server_error_message_depends_on_status() {
        let upstream = NetworkError::ServerError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert!(upstream.user_message().contains("later"));

        let client = NetworkError::ServerError {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(client.user_message(), "The request failed. Please try again.");
    }

    #[test]
    fn test_network_error_conversion() {
        let app_err: AppError = NetworkError::Timeout.into();
        assert!(matches!(app_err, AppError::Transport(NetworkError::Timeout)));
    }
}
