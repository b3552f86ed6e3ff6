//! Entry backend: loading and submitting annotations.

use std::sync::Arc;

use tokio::runtime::Handle;
use wildmap_core::{AppError, ErrorKind};
use wildmap_services::{Annotation, AnnotationKind, SubmitRequest, SubmitResult};

use super::{UiMessage, UiSender};
use crate::ports::AnnotationSink;

/// Error type for entry operations
#[derive(Debug, Clone)]
pub enum EntryError {
    Network(String),
    Storage(String),
    Other(String),
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryError::Network(s) => write!(f, "Network error: {}", s),
            EntryError::Storage(s) => write!(f, "Storage error: {}", s),
            EntryError::Other(s) => f.write_str(s),
        }
    }
}

impl std::error::Error for EntryError {}

impl From<AppError> for EntryError {
    fn from(e: AppError) -> Self {
        match e.kind() {
            ErrorKind::Transport => EntryError::Network(e.to_string()),
            ErrorKind::Storage => EntryError::Storage(e.to_string()),
            _ => EntryError::Other(e.to_string()),
        }
    }
}

#[derive(Debug)]
pub enum EntryServiceMessage {
    /// Result of reading one stored collection
    LoadDone {
        kind: AnnotationKind,
        result: Result<Vec<Annotation>, EntryError>,
    },
    /// Result of submitting an entry; carries the request for rendering
    SubmitDone {
        request: SubmitRequest,
        result: Result<SubmitResult, EntryError>,
    },
}

/// Request the stored collection for `kind`.
/// Sends `LoadDone` on the channel when complete.
pub fn request_load(
    tx: &UiSender,
    runtime: &Handle,
    sink: Arc<dyn AnnotationSink>,
    kind: AnnotationKind,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = sink.load_all(kind).await.map_err(EntryError::from);
        let _ = tx.send(UiMessage::Entry(EntryServiceMessage::LoadDone { kind, result }));
    });
}

/// Submit a new entry.
/// Sends `SubmitDone` on the channel when complete.
pub fn request_submit(
    tx: &UiSender,
    runtime: &Handle,
    sink: Arc<dyn AnnotationSink>,
    request: SubmitRequest,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = sink
            .submit(request.clone())
            .await
            .map_err(EntryError::from);
        let _ = tx.send(UiMessage::Entry(EntryServiceMessage::SubmitDone {
            request,
            result,
        }));
    });
}
