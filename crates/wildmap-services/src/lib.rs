pub mod annotation;
pub mod backend;
pub mod client;
pub mod http;
pub mod service;
pub mod store;

pub use annotation::{Annotation, AnnotationKind, SubmitReply, SubmitRequest};
pub use backend::{validate_submission, AnnotationBackend, StoreError, StoreResult};
pub use client::{AnnotationClient, SubmitResult};
pub use http::{AnnotationHttpClient, ClientError, RemoteSubmit};
pub use service::{AnnotationService, SubmitOutcome, SubmitStatus, INVALID_FIELDS_MESSAGE};
pub use store::JsonFileStore;
