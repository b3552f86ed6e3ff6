//! Annotation submission: validate, persist, report.

use serde_json::Value;
use std::sync::Arc;

use crate::annotation::{Annotation, AnnotationKind};
use crate::backend::{validate_submission, AnnotationBackend, StoreError, StoreResult};

/// Message returned for every rejected submission
pub const INVALID_FIELDS_MESSAGE: &str = "❌ Invalid or missing fields.";

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Saved,
    /// Client error; nothing was written
    Rejected,
    /// Persisting failed
    Failed,
}

impl SubmitStatus {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Saved => 200,
            Self::Rejected => 400,
            Self::Failed => 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub status: SubmitStatus,
    pub message: String,
    /// The stored record, present only when `status` is `Saved`
    pub saved: Option<(AnnotationKind, Annotation)>,
}

/// Validates submissions and appends them to the right collection.
#[derive(Clone)]
pub struct AnnotationService {
    backend: Arc<dyn AnnotationBackend>,
}

impl AnnotationService {
    pub fn new(backend: Arc<dyn AnnotationBackend>) -> Self {
        Self { backend }
    }

    pub fn load_all(&self, kind: AnnotationKind) -> StoreResult<Vec<Annotation>> {
        self.backend.load_all(kind)
    }

    /// Validate `raw` and, if it passes, append it to its collection.
    ///
    /// Exactly one collection is rewritten on success; none on rejection.
    pub fn submit(&self, raw: &Value) -> SubmitOutcome {
        let (kind, annotation) = match validate_submission(raw) {
            Ok(parsed) => parsed,
            Err(StoreError::Validation(reason)) => {
                tracing::info!("Rejected submission: {}", reason);
                return SubmitOutcome {
                    status: SubmitStatus::Rejected,
                    message: format!("{} ({})", INVALID_FIELDS_MESSAGE, reason),
                    saved: None,
                };
            }
            Err(e) => return failed(e),
        };

        match self.backend.append_and_save(kind, annotation.clone()) {
            Ok(len) => {
                tracing::info!(
                    "Saved {} entry {:?} ({} total)",
                    kind,
                    annotation.species,
                    len
                );
                SubmitOutcome {
                    status: SubmitStatus::Saved,
                    message: format!("✅ {} entry saved successfully!", kind),
                    saved: Some((kind, annotation)),
                }
            }
            Err(e) => failed(e),
        }
    }
}

fn failed(e: StoreError) -> SubmitOutcome {
    tracing::error!("Failed to save entry: {}", e);
    SubmitOutcome {
        status: SubmitStatus::Failed,
        message: "⚠️ Error saving entry.".to_string(),
        saved: None,
    }
}
