//! Shared test utilities for splunkquery integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory that clears host `SPLUNK*` variables.
//! - Mount the Splunk endpoints a successful search touches.
//!
//! Invariants / Assumptions:
//! - Every command runs inside its own temporary directory, so `.env`,
//!   `query.txt` and `splunkresults.json` never touch the repository.

use std::path::Path;

use assert_cmd::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const DISPATCH_BODY: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response>\n  <sid>1700000000.7</sid>\n</response>\n";

#[allow(dead_code)]
pub const STATUS_DONE_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<entry xmlns="http://www.w3.org/2005/Atom" xmlns:s="http://dev.splunk.com/ns/rest">
  <content type="text/xml">
    <s:dict>
      <s:key name="dispatchState">DONE</s:key>
      <s:key name="isDone">1</s:key>
    </s:dict>
  </content>
</entry>"#;

#[allow(dead_code)]
pub const RESULTS_BODY: &str = r#"{"preview":false,"init_offset":0,"messages":[],"results":[{"count":"42"}]}"#;

#[allow(dead_code)]
pub const STATUS_PATH: &str = "/services/search/jobs/1700000000.7";

const CONFIG_VARS: &[&str] = &[
    "SPLUNKBASEURL",
    "SPLUNKUSERNAME",
    "SPLUNKPASSWORD",
    "SPLUNKTOKEN",
    "SPLUNKTLSVERIFY",
    "SPLUNKTIMEOUT",
    "SPLUNKREQUESTTIMEOUT",
    "RUST_LOG",
];

/// Returns a hermetic `splunkquery` command running in `dir`.
pub fn splunkquery_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("splunkquery");
    cmd.current_dir(dir);
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Returns a hermetic command authenticated with an API token against `base_url`.
#[allow(dead_code)]
pub fn token_cmd(dir: &Path, base_url: &str) -> Command {
    let mut cmd = splunkquery_cmd(dir);
    cmd.env("SPLUNKBASEURL", base_url).env("SPLUNKTOKEN", "test-token");
    cmd
}

/// Write the default query file into `dir`.
#[allow(dead_code)]
pub fn write_query(dir: &Path) {
    std::fs::write(dir.join("query.txt"), "search index=_internal | stats count")
        .expect("write query file");
}

/// Mount dispatch, a DONE status and the results endpoint.
#[allow(dead_code)]
pub async fn mount_successful_search(server: &MockServer, results: &str) {
    Mock::given(method("POST"))
        .and(path("/services/search/jobs/"))
        .respond_with(ResponseTemplate::new(201).set_body_string(DISPATCH_BODY))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_DONE_BODY))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{STATUS_PATH}/results/")))
        .respond_with(ResponseTemplate::new(200).set_body_string(results))
        .mount(server)
        .await;
}
