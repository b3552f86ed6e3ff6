//! Integration tests for GeocodeClient using wiremock.

use wildmap_core::GeocodeConfig;
use wildmap_weather::{Coordinate, GeocodeClient, GeocodeError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GeocodeClient {
    GeocodeClient::new(&GeocodeConfig {
        search_url: format!("{}/search", server.uri()),
        contact_email: "ranger@example.org".to_string(),
        user_agent: "Wildmap-Test/1.0".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_resolve_returns_first_hit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "Tiergarten Berlin"))
        .and(query_param("limit", "1"))
        .and(query_param("email", "ranger@example.org"))
        .and(header("user-agent", "Wildmap-Test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "lat": "52.5145",
                "lon": "13.3501",
                "display_name": "Großer Tiergarten, Berlin, Deutschland"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let place = client(&server)
        .resolve("  Tiergarten Berlin ")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(place.coordinate, Coordinate::new(52.5145, 13.3501));
    assert_eq!(place.display_name, "Großer Tiergarten, Berlin, Deutschland");
}

#[tokio::test]
async fn test_empty_result_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let result = client(&server).resolve("Atlantis").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server).resolve("Berlin").await.unwrap_err();
    match err {
        GeocodeError::Status { status, reason } => {
            assert_eq!(status, 429);
            assert_eq!(reason, "Too Many Requests");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_blank_query_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).resolve("").await.unwrap_err();
    assert!(matches!(err, GeocodeError::EmptyQuery));
}
