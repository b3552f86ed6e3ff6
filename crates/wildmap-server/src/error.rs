use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use wildmap_services::{StoreError, SubmitReply};

/// Error response carrying the `{message}` body every endpoint uses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = SubmitReply {
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => Self::bad_request(msg),
            other => {
                tracing::error!(error = %other, "Store failure");
                Self::internal("Failed to read stored entries")
            }
        }
    }
}
