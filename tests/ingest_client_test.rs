//! Ingestion client integration tests
//!
//! Tests the `IngestClient` against a `wiremock` mock server: the success
//! envelope, service-reported failures with message extraction, non-success
//! HTTP statuses, and malformed bodies. Each test stands up its own server,
//! so they can run in parallel.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use askdoc::config::ServiceConfig;
use askdoc::error::AskdocError;
use askdoc::service::{FilePayload, IngestClient, IngestService};

/// Construct an `IngestClient` pointing at the given wiremock base URL.
fn make_client(base_url: &str) -> IngestClient {
    let config = ServiceConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    IngestClient::new(&config).expect("client builds")
}

fn sample_files() -> Vec<FilePayload> {
    vec![
        FilePayload::new("a.pdf", vec![0x25, 0x50, 0x44, 0x46]),
        FilePayload::new("b.pdf", vec![0x25, 0x50, 0x44, 0x46]),
    ]
}

#[tokio::test]
async fn test_successful_ingest_returns_accepted_filenames() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"count": 2, "filenames": ["a.pdf", "b.pdf"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server.uri());
    let receipt = client.ingest(&sample_files()).await.expect("ingest succeeds");

    assert_eq!(receipt.count, 2);
    assert!(receipt.filenames.contains("a.pdf"));
    assert!(receipt.filenames.contains("b.pdf"));
}

#[tokio::test]
async fn test_duplicate_filenames_are_deduplicated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"count": 3, "filenames": ["a.pdf", "a.pdf", "b.pdf"]}
        })))
        .mount(&server)
        .await;

    let client = make_client(&server.uri());
    let receipt = client.ingest(&sample_files()).await.unwrap();

    assert_eq!(receipt.filenames.len(), 2);
}

#[tokio::test]
async fn test_service_failure_surfaces_body_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error",
            "message": "no text extracted from upload"
        })))
        .mount(&server)
        .await;

    let client = make_client(&server.uri());
    let err = client.ingest(&sample_files()).await.unwrap_err();

    let err = err.downcast_ref::<AskdocError>().expect("typed error");
    match err {
        AskdocError::Service(msg) => assert_eq!(msg, "no text extracted from upload"),
        other => panic!("expected Service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_status_extracts_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "detail": "Ingestion failed: index unavailable"
        })))
        .mount(&server)
        .await;

    let client = make_client(&server.uri());
    let err = client.ingest(&sample_files()).await.unwrap_err();

    let err = err.downcast_ref::<AskdocError>().unwrap();
    match err {
        AskdocError::Service(msg) => assert_eq!(msg, "Ingestion failed: index unavailable"),
        other => panic!("expected Service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_without_body_uses_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = make_client(&server.uri());
    let err = client.ingest(&sample_files()).await.unwrap_err();

    let err = err.downcast_ref::<AskdocError>().unwrap();
    match err {
        AskdocError::Service(msg) => assert_eq!(msg, "document service request failed"),
        other => panic!("expected Service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = make_client(&server.uri());
    let err = client.ingest(&sample_files()).await.unwrap_err();

    let err = err.downcast_ref::<AskdocError>().unwrap();
    assert!(matches!(err, AskdocError::Service(_)));
}

#[tokio::test]
async fn test_success_envelope_without_payload_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "success"})),
        )
        .mount(&server)
        .await;

    let client = make_client(&server.uri());
    let err = client.ingest(&sample_files()).await.unwrap_err();

    let err = err.downcast_ref::<AskdocError>().unwrap();
    assert!(matches!(err, AskdocError::Service(_)));
}

#[tokio::test]
async fn test_empty_batch_is_rejected_without_a_request() {
    let server = MockServer::start().await;

    // No mock mounted: a request would fail the test via the 404 branch,
    // but the guard fires before any request is issued.
    let client = make_client(&server.uri());
    let err = client.ingest(&[]).await.unwrap_err();

    let err = err.downcast_ref::<AskdocError>().unwrap();
    assert!(matches!(err, AskdocError::Rejected(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
