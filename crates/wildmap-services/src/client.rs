//! Unified annotation client supporting local and remote backends.
//!
//! This module provides `AnnotationClient`, an enum that wraps the in-process
//! service and the HTTP client with a consistent async interface.

use std::sync::Arc;

use serde_json::Value;
use wildmap_core::AppError;

use crate::annotation::{Annotation, AnnotationKind, SubmitRequest};
use crate::http::AnnotationHttpClient;
use crate::service::{AnnotationService, SubmitStatus};

/// Result of a submission as seen by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub accepted: bool,
    pub message: String,
}

/// Unified annotation client.
#[derive(Clone)]
pub enum AnnotationClient {
    /// Same-process service over the file store.
    Local(Arc<AnnotationService>),

    /// Remote Wildmap server.
    Http(Arc<AnnotationHttpClient>),
}

impl AnnotationClient {
    pub fn local(service: AnnotationService) -> Self {
        Self::Local(Arc::new(service))
    }

    pub fn http(client: AnnotationHttpClient) -> Self {
        Self::Http(Arc::new(client))
    }

    /// Read the full collection for `kind`.
    pub async fn load_all(&self, kind: AnnotationKind) -> Result<Vec<Annotation>, AppError> {
        match self {
            Self::Local(service) => {
                let service = service.clone();
                tokio::task::spawn_blocking(move || service.load_all(kind))
                    .await
                    .map_err(|e| AppError::Other(e.into()))?
                    .map_err(AppError::from)
            }
            Self::Http(client) => client.list(kind).await.map_err(AppError::from),
        }
    }

    /// Submit a new annotation.
    ///
    /// Validation rejections come back as `accepted: false`; only transport
    /// and storage failures are errors.
    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitResult, AppError> {
        match self {
            Self::Local(service) => {
                let service = service.clone();
                let raw: Value = serde_json::to_value(&request)
                    .map_err(|e| AppError::Other(e.into()))?;
                let outcome = tokio::task::spawn_blocking(move || service.submit(&raw))
                    .await
                    .map_err(|e| AppError::Other(e.into()))?;

                match outcome.status {
                    SubmitStatus::Failed => Err(AppError::Storage(outcome.message)),
                    status => Ok(SubmitResult {
                        accepted: status == SubmitStatus::Saved,
                        message: outcome.message,
                    }),
                }
            }
            Self::Http(client) => {
                let reply = client.submit(&request).await?;
                Ok(SubmitResult {
                    accepted: reply.accepted,
                    message: reply.message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;

    fn local(dir: &std::path::Path) -> AnnotationClient {
        let store = JsonFileStore::open(dir).unwrap();
        AnnotationClient::local(AnnotationService::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_local_submit_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let client = local(dir.path());

        let result = client
            .submit(SubmitRequest {
                kind: AnnotationKind::Animal,
                species: "Hedgehog".into(),
                note: None,
                lat: 52.5,
                lon: 13.4,
            })
            .await
            .unwrap();
        assert!(result.accepted);

        let animals = client.load_all(AnnotationKind::Animal).await.unwrap();
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].species, "Hedgehog");
    }

    #[tokio::test]
    async fn test_local_rejection_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = local(dir.path());

        let result = client
            .submit(SubmitRequest {
                kind: AnnotationKind::Tree,
                species: " ".into(),
                note: None,
                lat: 52.5,
                lon: 13.4,
            })
            .await
            .unwrap();
        assert!(!result.accepted);
        assert!(client.load_all(AnnotationKind::Tree).await.unwrap().is_empty());
    }
}
