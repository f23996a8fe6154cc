//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Connections built here poll every few milliseconds so budgets stay cheap
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::path::Path;
use std::time::Duration;

#[allow(unused_imports)]
pub use secrecy::{ExposeSecret, SecretString};
#[allow(unused_imports)]
pub use splunkquery_client::{
    CancellationToken, ClientError, Connection, Credentials, JobState, SearchJob, SearchQuery,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sid handed out by `jobs/dispatch_success.xml`.
#[allow(dead_code)]
pub const SID: &str = "1700000000.42";

/// Path of the status endpoint for [`SID`].
#[allow(dead_code)]
pub const STATUS_PATH: &str = "/services/search/jobs/1700000000.42";

/// Path of the results endpoint for [`SID`].
#[allow(dead_code)]
pub const RESULTS_PATH: &str = "/services/search/jobs/1700000000.42/results/";

/// Load a fixture file as text.
#[allow(dead_code)]
pub fn load_fixture(fixture_path: &str) -> String {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()))
}

#[allow(dead_code)]
pub fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into())
}

/// Connection authenticating with an API token.
#[allow(dead_code)]
pub fn token_connection(base_url: &str, timeout_secs: u64) -> Connection {
    Connection::builder()
        .base_url(base_url.to_string())
        .api_token(secret("abc"))
        .search_timeout_secs(timeout_secs)
        .poll_interval(Duration::from_millis(5))
        .build()
        .expect("connection should build")
}

/// Connection authenticating with `admin` / `changeme`.
#[allow(dead_code)]
pub fn session_connection(base_url: &str, timeout_secs: u64) -> Connection {
    Connection::builder()
        .base_url(base_url.to_string())
        .username("admin".to_string())
        .password(secret("changeme"))
        .search_timeout_secs(timeout_secs)
        .poll_interval(Duration::from_millis(5))
        .build()
        .expect("connection should build")
}

/// A base URL nothing is listening on.
#[allow(dead_code)]
pub fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Number of requests the mock server has seen for `path`.
#[allow(dead_code)]
pub async fn request_count(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|r| r.url.path() == path)
        .count()
}

/// Mount the dispatch endpoint answering with [`SID`].
#[allow(dead_code)]
pub async fn mount_dispatch(server: &MockServer) {
    use wiremock::matchers::{method, path};

    Mock::given(method("POST"))
        .and(path("/services/search/jobs/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_string(load_fixture("jobs/dispatch_success.xml")),
        )
        .mount(server)
        .await;
}

/// Mount the status endpoint answering `DONE`.
#[allow(dead_code)]
pub async fn mount_status_done(server: &MockServer) {
    use wiremock::matchers::{method, path};

    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("jobs/status_done.xml")),
        )
        .mount(server)
        .await;
}

/// Dispatch and poll a job to `DONE` against a server with both endpoints mounted.
#[allow(dead_code)]
pub async fn finished_job(connection: &Connection, credentials: &Credentials) -> SearchJob {
    let mut job = connection
        .dispatch(credentials, &SearchQuery::new("search index=_internal | head 10"))
        .await
        .expect("dispatch should succeed");
    connection
        .poll(credentials, &mut job, &CancellationToken::new())
        .await
        .expect("poll should reach DONE");
    job
}
