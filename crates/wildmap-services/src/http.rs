//! HTTP client for a remote Wildmap server (`POST /add`, collection reads).

use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use wildmap_core::{AppError, NetworkError, ReqwestErrorExt};

use crate::annotation::{Annotation, AnnotationKind, SubmitReply, SubmitRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::InvalidUrl(msg) => {
                AppError::Config(wildmap_core::ConfigError::Invalid(msg))
            }
            ClientError::Network(inner) => AppError::Transport(inner.into_network_error()),
            ClientError::Status { status, message } => {
                AppError::Transport(NetworkError::ServerError { status, message })
            }
        }
    }
}

/// Outcome of a remote submission that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSubmit {
    /// True for HTTP 200, false for a 400 validation rejection
    pub accepted: bool,
    pub message: String,
}

/// Client for the annotation endpoints of a Wildmap server
#[derive(Debug, Clone)]
pub struct AnnotationHttpClient {
    base_url: Url,
    client: Arc<Client>,
}

impl AnnotationHttpClient {
    /// Create a client for the server at `base_url`.
    ///
    /// A path prefix on the base URL is kept, so `http://host/wildmap` posts
    /// to `http://host/wildmap/add`. A zero `timeout` disables the request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    /// Resolve `path` (relative, no leading slash) against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// Submit a new annotation.
    ///
    /// Both 200 and 400 carry a `{message}` body and are returned as
    /// `RemoteSubmit`; any other status is an error.
    pub async fn submit(&self, request: &SubmitRequest) -> Result<RemoteSubmit, ClientError> {
        let url = self.endpoint("add")?;
        tracing::debug!("Submitting {} entry to {}", request.kind, url);

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();

        if status == StatusCode::OK || status == StatusCode::BAD_REQUEST {
            let reply: SubmitReply = response.json().await?;
            return Ok(RemoteSubmit {
                accepted: status == StatusCode::OK,
                message: reply.message,
            });
        }

        let message = response
            .json::<SubmitReply>()
            .await
            .map(|r| r.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
        tracing::warn!("Submit failed with status {}: {}", status, message);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Read the full collection for `kind`.
    pub async fn list(&self, kind: AnnotationKind) -> Result<Vec<Annotation>, ClientError> {
        let url = self.endpoint(kind.file_name())?;
        tracing::debug!("Loading {} collection from {}", kind, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> AnnotationHttpClient {
        AnnotationHttpClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let with_slash = client("http://maps.example/wildmap/");
        let without_slash = client("http://maps.example/wildmap");

        for c in [with_slash, without_slash] {
            assert_eq!(
                c.endpoint("add").unwrap().as_str(),
                "http://maps.example/wildmap/add"
            );
            assert_eq!(
                c.endpoint(AnnotationKind::Tree.file_name()).unwrap().as_str(),
                "http://maps.example/wildmap/trees.json"
            );
        }
    }

    #[test]
    fn test_endpoint_at_root() {
        let c = client("http://localhost:3000");
        assert_eq!(c.endpoint("add").unwrap().as_str(), "http://localhost:3000/add");
    }

    #[test]
    fn test_non_base_url_is_rejected() {
        let result = AnnotationHttpClient::new("mailto:someone@example.org", Duration::ZERO);
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
