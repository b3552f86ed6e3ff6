//! Integration tests for AnnotationHttpClient using wiremock.
//!
//! These tests verify the client behavior against a mock Wildmap server.

use std::time::Duration;

use wildmap_services::{AnnotationHttpClient, AnnotationKind, ClientError, SubmitRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn fox_request() -> SubmitRequest {
    SubmitRequest {
        kind: AnnotationKind::Animal,
        species: "Red fox".to_string(),
        note: Some("crossing the path".to_string()),
        lat: 52.51,
        lon: 13.35,
    }
}

#[tokio::test]
async fn test_submit_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add"))
        .and(body_json(serde_json::json!({
            "type": "animal",
            "species": "Red fox",
            "note": "crossing the path",
            "lat": 52.51,
            "lon": 13.35
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "✅ animal entry saved successfully!"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AnnotationHttpClient::new(&mock_server.uri(), TIMEOUT).unwrap();
    let reply = client.submit(&fox_request()).await.unwrap();

    assert!(reply.accepted);
    assert_eq!(reply.message, "✅ animal entry saved successfully!");
}

#[tokio::test]
async fn test_submit_validation_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "❌ Invalid or missing fields. (species must be a non-empty string)"
        })))
        .mount(&mock_server)
        .await;

    let client = AnnotationHttpClient::new(&mock_server.uri(), TIMEOUT).unwrap();
    let reply = client.submit(&fox_request()).await.unwrap();

    assert!(!reply.accepted);
    assert!(reply.message.starts_with("❌ Invalid or missing fields."));
}

#[tokio::test]
async fn test_submit_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "⚠️ Error saving entry."
        })))
        .mount(&mock_server)
        .await;

    let client = AnnotationHttpClient::new(&mock_server.uri(), TIMEOUT).unwrap();
    let err = client.submit(&fox_request()).await.unwrap_err();

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "⚠️ Error saving entry.");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trees.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "species": "Oak", "lat": 52.1, "lon": 13.1 },
            { "species": "Linden", "note": "avenue", "lat": 52.2, "lon": 13.2 }
        ])))
        .mount(&mock_server)
        .await;

    let client = AnnotationHttpClient::new(&mock_server.uri(), TIMEOUT).unwrap();
    let trees = client.list(AnnotationKind::Tree).await.unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].species, "Oak");
    assert_eq!(trees[1].note.as_deref(), Some("avenue"));
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wildmap/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "✅ animal entry saved successfully!"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wildmap/animals.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "species": "Red fox", "lat": 52.51, "lon": 13.35 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "posted to the server root"
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let base = format!("{}/wildmap", mock_server.uri());
    let client = AnnotationHttpClient::new(&base, TIMEOUT).unwrap();

    let reply = client.submit(&fox_request()).await.unwrap();
    assert_eq!(reply.message, "✅ animal entry saved successfully!");

    let animals = client.list(AnnotationKind::Animal).await.unwrap();
    assert_eq!(animals.len(), 1);
    assert_eq!(animals[0].species, "Red fox");
}

#[test]
fn test_invalid_base_url() {
    let result = AnnotationHttpClient::new("not a url", TIMEOUT);
    assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
}
