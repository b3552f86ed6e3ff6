//! Annotation storage backend trait and error types.
//!
//! This module defines the `AnnotationBackend` trait that abstracts over
//! storage implementations, plus submission validation.

use serde_json::Value;
use thiserror::Error;
use wildmap_core::AppError;

use crate::annotation::{Annotation, AnnotationKind};

/// Errors that can occur during annotation storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Submitted record failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reading or writing a collection file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A collection file exists but is not a valid annotation array.
    #[error("Corrupt collection {file}: {message}")]
    Corrupt { file: String, message: String },
}

impl StoreError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => AppError::Validation(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Result type for annotation storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for annotation storage backends.
///
/// Each kind is an independent ordered collection. Implementations must
/// preserve insertion order and never reorder or drop prior entries.
pub trait AnnotationBackend: Send + Sync {
    /// Read the full collection for `kind`.
    fn load_all(&self, kind: AnnotationKind) -> StoreResult<Vec<Annotation>>;

    /// Append `record` to the collection for `kind` and persist the whole
    /// collection. Returns the new collection length.
    fn append_and_save(&self, kind: AnnotationKind, record: Annotation) -> StoreResult<usize>;
}

/// Validate a raw `POST /add` body.
///
/// # Errors
/// Returns `StoreError::Validation` if:
/// - The body is not an object.
/// - `type` is not `"animal"` or `"tree"`.
/// - `species` is missing, not a string, or blank after trimming.
/// - `note` is present but neither a string nor null.
/// - `lat`/`lon` are missing, not numbers, or outside the coordinate ranges.
pub fn validate_submission(raw: &Value) -> StoreResult<(AnnotationKind, Annotation)> {
    let obj = raw
        .as_object()
        .ok_or_else(|| StoreError::validation("body must be a JSON object"))?;

    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::validation("type is required"))?
        .parse::<AnnotationKind>()
        .map_err(StoreError::validation)?;

    let species = obj
        .get("species")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StoreError::validation("species must be a non-empty string"))?;

    let note = match obj.get("note") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string),
        Some(_) => return Err(StoreError::validation("note must be a string")),
    };

    let latitude = coordinate_field(obj.get("lat"), "lat", 90.0)?;
    let longitude = coordinate_field(obj.get("lon"), "lon", 180.0)?;

    Ok((
        kind,
        Annotation {
            species: species.to_string(),
            note,
            latitude,
            longitude,
        },
    ))
}

fn coordinate_field(value: Option<&Value>, name: &str, bound: f64) -> StoreResult<f64> {
    let v = value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| StoreError::validation(format!("{name} must be a number")))?;

    if !(-bound..=bound).contains(&v) {
        return Err(StoreError::validation(format!(
            "{name} must be between -{bound} and {bound}"
        )));
    }
    Ok(v)
}
