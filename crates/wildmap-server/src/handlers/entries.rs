use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use wildmap_services::{Annotation, AnnotationKind, SubmitReply, INVALID_FIELDS_MESSAGE};

use crate::error::ApiError;
use crate::state::AppState;

const SAVE_FAILED: &str = "⚠️ Error saving entry.";

/// `POST /add`
///
/// 200 on success, 400 for any invalid body (including unparseable JSON),
/// 500 when persisting fails. Every response is `{message}`.
pub async fn add_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitReply>), ApiError> {
    let Json(raw) = payload.map_err(|rejection| {
        tracing::info!(error = %rejection.body_text(), "Unreadable /add body");
        ApiError::bad_request(INVALID_FIELDS_MESSAGE)
    })?;

    let service = state.annotations.clone();
    let outcome = tokio::task::spawn_blocking(move || service.submit(&raw))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Submit task failed");
            ApiError::internal(SAVE_FAILED)
        })?;

    let status = StatusCode::from_u16(outcome.status.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok((
        status,
        Json(SubmitReply {
            message: outcome.message,
        }),
    ))
}

/// `GET /animals.json`
pub async fn list_animals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Annotation>>, ApiError> {
    list(state, AnnotationKind::Animal).await
}

/// `GET /trees.json`
pub async fn list_trees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Annotation>>, ApiError> {
    list(state, AnnotationKind::Tree).await
}

async fn list(state: Arc<AppState>, kind: AnnotationKind) -> Result<Json<Vec<Annotation>>, ApiError> {
    let service = state.annotations.clone();
    let records = tokio::task::spawn_blocking(move || service.load_all(kind))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Load task failed");
            ApiError::internal("Failed to read stored entries")
        })??;

    tracing::debug!(kind = %kind, count = records.len(), "Serving collection");
    Ok(Json(records))
}
