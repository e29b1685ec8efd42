//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Every client built here has already passed the credential check against
//!   the given mock server
//! - Polling intervals are shortened so tests never wait seconds
//!
//! # What this does NOT handle
//! - Endpoint-specific mocks (mounted by each test)

#![allow(dead_code)]

use std::time::Duration;

pub use secrecy::SecretString;
pub use serde_json::json;
pub use splunk_search_client::{AuthStrategy, CancellationToken, SplunkClient};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use wiremock::matchers::{method, path};

pub const TEST_TOKEN: &str = "test-token";

/// Interval used for both job and preview polling in tests.
pub const FAST_POLL: Duration = Duration::from_millis(20);

pub fn token_auth() -> AuthStrategy {
    AuthStrategy::ApiToken {
        token: SecretString::new(TEST_TOKEN.to_string().into()),
    }
}

/// Accept the construction-time credential check.
pub async fn mount_current_context(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/services/authentication/current-context"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entry": [{"name": "tester", "content": {"username": "tester"}}]
        })))
        .mount(server)
        .await;
}

/// Build a verified client against `server` with fast polling.
pub async fn connected_client(server: &MockServer) -> SplunkClient {
    mount_current_context(server).await;
    SplunkClient::builder()
        .base_url(server.uri())
        .auth_strategy(token_auth())
        .job_poll_interval(FAST_POLL)
        .preview_poll_interval(FAST_POLL)
        .build()
        .await
        .expect("client should build against mock server")
}

/// A status document with one entry in the given dispatch state.
pub fn job_status(sid: &str, dispatch_state: &str) -> serde_json::Value {
    json!({
        "generator": {"build": "abc", "version": "9.1.0"},
        "entry": [{
            "name": "search * TEST",
            "id": format!("https://localhost:8089/services/search/jobs/{sid}"),
            "content": {
                "sid": sid,
                "dispatchState": dispatch_state,
                "isDone": dispatch_state == "DONE",
                "isFailed": dispatch_state == "FAILED",
                "doneProgress": if dispatch_state == "DONE" { 1.0 } else { 0.5 },
                "eventCount": "100",
                "resultCount": 100,
                "search": "search * TEST",
                "messages": []
            }
        }],
        "paging": {"total": 1, "perPage": 0, "offset": 0}
    })
}

/// A status document with no entries.
pub fn empty_job_status() -> serde_json::Value {
    json!({"entry": [], "paging": {"total": 0, "perPage": 0, "offset": 0}})
}

/// A results page whose records are numbered `first..first + count`.
pub fn results_page(preview: bool, first: usize, count: usize) -> serde_json::Value {
    let results: Vec<serde_json::Value> = (first..first + count)
        .map(|i| json!({"n": i.to_string(), "_raw": format!("event {i}")}))
        .collect();
    json!({
        "preview": preview,
        "init_offset": first,
        "messages": [],
        "fields": [{"name": "n"}, {"name": "_raw"}],
        "results": results
    })
}
