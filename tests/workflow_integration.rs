//! Workflow integration tests
//!
//! Drives the full select → ingest → ask → start-over cycle through the
//! public API with real HTTP clients against a `wiremock` server, covering
//! the happy path, transport-failure phase reversion with preserved input,
//! guard rejections, and source-metadata degradation.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use askdoc::config::ServiceConfig;
use askdoc::error::AskdocError;
use askdoc::service::{create_clients, FilePayload};
use askdoc::workflow::{Phase, Workflow};

/// Build a workflow whose clients point at the given wiremock base URL.
fn make_workflow(base_url: &str) -> Workflow {
    let config = ServiceConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    let (ingest, query) = create_clients(&config).expect("clients build");
    Workflow::new(Box::new(ingest), Box::new(query))
}

fn sample_files() -> Vec<FilePayload> {
    vec![
        FilePayload::new("a.pdf", vec![0x25, 0x50]),
        FilePayload::new("b.pdf", vec![0x25, 0x50]),
    ]
}

async fn mount_ingest_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"count": 2, "filenames": ["a.pdf", "b.pdf"]}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_cycle_select_ingest_ask_start_over() {
    let server = MockServer::start().await;
    mount_ingest_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "answer": "Based on the document, **Paris** is the capital...",
            "sources": {
                "chunks_used": 2,
                "pages": ["p1", "p2"],
                "segments": [{"relevance": 80}, {"relevance": 95}],
                "files": ["a.pdf", "b.pdf", "a.pdf"]
            }
        })))
        .mount(&server)
        .await;

    let mut workflow = make_workflow(&server.uri());

    workflow.select_files(sample_files()).unwrap();
    assert_eq!(workflow.phase(), Phase::SelectingFiles);

    workflow.ingest().await.unwrap();
    assert_eq!(workflow.phase(), Phase::ReadyToQuery);
    assert_eq!(workflow.ingested_filenames().len(), 2);

    workflow.set_question("What is the capital?");
    workflow.ask().await.unwrap();
    assert_eq!(workflow.phase(), Phase::ReadyToQuery);

    let answer = workflow.answer().expect("answer stored");
    assert_eq!(answer.text, "Paris is the capital.");
    let summary = answer.source_summary.as_ref().expect("summary parsed");
    assert_eq!(summary.total_chunks_used, 2);
    assert_eq!(summary.page_references, vec!["p1", "p2"]);
    assert_eq!(summary.segment_details[0].relevance, Some(80));
    assert_eq!(summary.segment_details[1].relevance, Some(95));
    assert_eq!(summary.referenced_files, vec!["a.pdf", "b.pdf"]);

    // Start over: the full dependent chain is cleared.
    workflow.reset();
    assert_eq!(workflow.phase(), Phase::SelectingFiles);
    assert!(workflow.selected_files().is_empty());
    assert!(workflow.ingested_filenames().is_empty());
    assert_eq!(workflow.question(), "");
    assert!(workflow.answer().is_none());
}

#[tokio::test]
async fn test_ingest_failure_preserves_selection_and_allows_retry() {
    let server = MockServer::start().await;

    // First attempt fails at the transport level, the retry succeeds.
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "detail": "Ingestion failed: index unavailable"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_ingest_success(&server).await;

    let mut workflow = make_workflow(&server.uri());
    workflow.select_files(sample_files()).unwrap();

    let err = workflow.ingest().await.unwrap_err();
    let err = err.downcast_ref::<AskdocError>().unwrap();
    assert!(matches!(err, AskdocError::Service(_)));
    assert_eq!(workflow.phase(), Phase::SelectingFiles);
    assert_eq!(workflow.selected_files().len(), 2);
    assert!(workflow.ingested_filenames().is_empty());

    // Retry without re-choosing files.
    workflow.ingest().await.unwrap();
    assert_eq!(workflow.phase(), Phase::ReadyToQuery);
}

#[tokio::test]
async fn test_query_failure_keeps_question_and_ingested_set() {
    let server = MockServer::start().await;
    mount_ingest_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error",
            "message": "model overloaded"
        })))
        .mount(&server)
        .await;

    let mut workflow = make_workflow(&server.uri());
    workflow.select_files(sample_files()).unwrap();
    workflow.ingest().await.unwrap();
    workflow.set_question("Where?");

    let err = workflow.ask().await.unwrap_err();
    let err = err.downcast_ref::<AskdocError>().unwrap();
    match err {
        AskdocError::Service(msg) => assert_eq!(msg, "model overloaded"),
        other => panic!("expected Service error, got {:?}", other),
    }

    assert_eq!(workflow.phase(), Phase::ReadyToQuery);
    assert_eq!(workflow.question(), "Where?");
    assert_eq!(workflow.ingested_filenames().len(), 2);
    assert!(workflow.answer().is_none());
}

#[tokio::test]
async fn test_guards_fire_before_any_request() {
    let server = MockServer::start().await;
    let mut workflow = make_workflow(&server.uri());

    // Nothing selected.
    let err = workflow.ingest().await.unwrap_err();
    let err = err.downcast_ref::<AskdocError>().unwrap();
    match err {
        AskdocError::Rejected(msg) => assert_eq!(msg, "no file selected"),
        other => panic!("expected Rejected, got {:?}", other),
    }

    // Nothing ingested.
    workflow.set_question("Where?");
    let err = workflow.ask().await.unwrap_err();
    let err = err.downcast_ref::<AskdocError>().unwrap();
    match err {
        AskdocError::Rejected(msg) => assert_eq!(msg, "not yet ingested"),
        other => panic!("expected Rejected, got {:?}", other),
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_question_rejected_after_ingest() {
    let server = MockServer::start().await;
    mount_ingest_success(&server).await;

    let mut workflow = make_workflow(&server.uri());
    workflow.select_files(sample_files()).unwrap();
    workflow.ingest().await.unwrap();
    workflow.set_question("   ");

    let err = workflow.ask().await.unwrap_err();
    let err = err.downcast_ref::<AskdocError>().unwrap();
    match err {
        AskdocError::Rejected(msg) => assert_eq!(msg, "question is blank"),
        other => panic!("expected Rejected, got {:?}", other),
    }

    // Only the ingest request reached the server.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_sources_degrade_to_no_summary() {
    let server = MockServer::start().await;
    mount_ingest_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "answer": "the answer",
            "sources": ["unexpected", "shape"]
        })))
        .mount(&server)
        .await;

    let mut workflow = make_workflow(&server.uri());
    workflow.select_files(sample_files()).unwrap();
    workflow.ingest().await.unwrap();
    workflow.set_question("Where?");
    workflow.ask().await.unwrap();

    let answer = workflow.answer().expect("answer still displayed");
    assert_eq!(answer.text, "The answer");
    assert!(answer.source_summary.is_none());
}

#[tokio::test]
async fn test_new_selection_after_answer_clears_stale_citations() {
    let server = MockServer::start().await;
    mount_ingest_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "answer": "the answer",
            "sources": {"chunks_used": 1, "pages": ["p1"], "files": ["a.pdf"]}
        })))
        .mount(&server)
        .await;

    let mut workflow = make_workflow(&server.uri());
    workflow.select_files(sample_files()).unwrap();
    workflow.ingest().await.unwrap();
    workflow.set_question("Where?");
    workflow.ask().await.unwrap();
    assert!(workflow.answer().is_some());

    workflow
        .select_files(vec![FilePayload::new("c.pdf", vec![0x25])])
        .unwrap();

    assert_eq!(workflow.phase(), Phase::SelectingFiles);
    assert!(workflow.answer().is_none());
    assert!(workflow.ingested_filenames().is_empty());
    assert_eq!(workflow.question(), "");
}
