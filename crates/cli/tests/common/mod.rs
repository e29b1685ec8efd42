//! Shared test utilities for splunk-search integration tests.
//!
//! Invariants / Assumptions:
//! - Every command built here is hermetic: no `.env`, no host `SPLUNK_*` leakage.
//! - `SPLUNK_API_TOKEN` is set to "test-token" unless overridden.
//! - Poll intervals are shortened so waits finish in milliseconds.

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Returns a hermetic `splunk-search` command for integration testing.
pub fn splunk_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("splunk-search");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("SPLUNK_API_TOKEN", TEST_TOKEN);
    cmd.env("SPLUNK_JOB_POLL_INTERVAL_MS", "10");
    cmd.env("SPLUNK_PREVIEW_POLL_INTERVAL_MS", "10");

    cmd.env_remove("SPLUNK_BASE_URL")
        .env_remove("SPLUNK_USERNAME")
        .env_remove("SPLUNK_PASSWORD")
        .env_remove("SPLUNK_WEB_URL")
        .env_remove("SPLUNK_TIMEOUT")
        .env_remove("SPLUNK_SKIP_VERIFY")
        .env_remove("SPLUNK_METRICS_BIND")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic command pointed at `server`.
pub fn splunk_cmd_for(server: &MockServer) -> Command {
    let mut cmd = splunk_cmd();
    cmd.env("SPLUNK_BASE_URL", server.uri());
    cmd
}

/// Accept the credential check every connecting command performs first.
pub async fn mount_current_context(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/services/authentication/current-context"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entry": [{"name": "tester", "content": {"username": "tester"}}]
        })))
        .mount(server)
        .await;
}

pub fn job_status(sid: &str, dispatch_state: &str) -> serde_json::Value {
    json!({
        "entry": [{
            "name": "search * TEST",
            "content": {
                "sid": sid,
                "dispatchState": dispatch_state,
                "doneProgress": if dispatch_state == "DONE" { 1.0 } else { 0.3 },
                "eventCount": "42",
                "resultCount": "3",
                "messages": []
            }
        }]
    })
}

pub fn results_page(preview: bool, first: usize, count: usize) -> serde_json::Value {
    let results: Vec<serde_json::Value> = (first..first + count)
        .map(|i| json!({"n": i.to_string(), "host": format!("web-{i}")}))
        .collect();
    json!({"preview": preview, "init_offset": first, "messages": [], "results": results})
}
