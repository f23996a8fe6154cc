//! End-to-end search pipeline tests against a mock Splunk server.
//!
//! # Invariants
//! - The results file is written only after DONE with a non-empty payload
//! - Any stage failure skips every later stage

mod common;

use std::sync::Arc;

use common::*;
use wiremock::matchers::{method, path};

async fn mount_results(server: &MockServer, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_search_writes_results_unmodified() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server).await;
    mount_status_done(&mock_server).await;
    let payload = load_fixture("jobs/results.json").into_bytes();
    mount_results(&mock_server, payload.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("splunkresults.json");

    let connection = token_connection(&mock_server.uri(), 5);
    let credentials = connection.establish().await.unwrap();
    let job = connection
        .run_search(
            &credentials,
            &SearchQuery::new("search index=_internal | head 10"),
            &output,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(job.state(), &JobState::Done);
    assert_eq!(std::fs::read(&output).unwrap(), payload);
}

#[tokio::test]
async fn test_run_search_with_session_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("auth/login_success.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_dispatch(&mock_server).await;
    mount_status_done(&mock_server).await;
    mount_results(&mock_server, b"{\"results\":[]}".to_vec()).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    let connection = session_connection(&mock_server.uri(), 5);
    let credentials = connection.establish().await.unwrap();
    connection
        .run_search(
            &credentials,
            &SearchQuery::new("search *"),
            &output,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), b"{\"results\":[]}");
}

#[tokio::test]
async fn test_run_search_empty_payload_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server).await;
    mount_status_done(&mock_server).await;
    mount_results(&mock_server, Vec::new()).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("splunkresults.json");

    let connection = token_connection(&mock_server.uri(), 5);
    let credentials = connection.establish().await.unwrap();
    let err = connection
        .run_search(
            &credentials,
            &SearchQuery::new("search *"),
            &output,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::EmptyResults { .. }), "got {:?}", err);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_search_timeout_skips_fetch() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("jobs/status_running.xml")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("splunkresults.json");

    let connection = token_connection(&mock_server.uri(), 2);
    let credentials = connection.establish().await.unwrap();
    let err = connection
        .run_search(
            &credentials,
            &SearchQuery::new("search *"),
            &output,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout { .. }), "got {:?}", err);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_search_dispatch_rejected_skips_polling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(load_fixture("jobs/dispatch_unauthorized.xml")),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("splunkresults.json");

    let connection = token_connection(&mock_server.uri(), 5);
    let credentials = connection.establish().await.unwrap();
    let err = connection
        .run_search(
            &credentials,
            &SearchQuery::new("search *"),
            &output,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(err.is_auth_error(), "got {:?}", err);
    assert_eq!(request_count(&mock_server, STATUS_PATH).await, 0);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_spawn_search_on_shared_connection() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server).await;
    mount_status_done(&mock_server).await;
    mount_results(&mock_server, b"{\"results\":[{\"count\":\"1\"}]}".to_vec()).await;

    let dir = tempfile::tempdir().unwrap();
    let connection = Arc::new(token_connection(&mock_server.uri(), 5));
    let credentials = connection.establish().await.unwrap();

    let handles: Vec<_> = ["a.json", "b.json"]
        .iter()
        .map(|name| {
            Arc::clone(&connection).spawn_search(
                credentials.clone(),
                SearchQuery::new("search * | stats count"),
                dir.path().join(name),
                CancellationToken::new(),
            )
        })
        .collect();

    for handle in handles {
        let job = handle.wait().await.unwrap();
        assert_eq!(job.state(), &JobState::Done);
    }

    for name in ["a.json", "b.json"] {
        assert_eq!(
            std::fs::read(dir.path().join(name)).unwrap(),
            b"{\"results\":[{\"count\":\"1\"}]}"
        );
    }
}

#[tokio::test]
async fn test_aborted_search_reports_worker_error() {
    let mock_server = MockServer::start().await;
    mount_dispatch(&mock_server).await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("jobs/status_running.xml")),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("aborted.json");
    let connection = Arc::new(token_connection(&mock_server.uri(), 10_000));
    let credentials = connection.establish().await.unwrap();

    let handle = connection.spawn_search(
        credentials,
        SearchQuery::new("search *"),
        output.clone(),
        CancellationToken::new(),
    );
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    handle.abort();

    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, ClientError::Worker(_)), "got {:?}", err);
    assert!(!output.exists());
}
