//! Job status and wait-loop tests.
//!
//! # Invariants
//! - `get_search_job` makes one request and never retries
//! - `wait_for_job` returns without sleeping when the first poll is `DONE`
//! - Zero entries means `NotFound`, not an error
//! - Cancellation interrupts the poll sleep promptly

mod common;

use std::time::{Duration, Instant};

use common::*;
use splunk_search_client::{ClientError, DispatchState, WaitOutcome};
use wiremock::matchers::{method, path, query_param};

#[tokio::test]
async fn test_get_search_job_decodes_status() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .and(query_param("output_mode", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("abc123", "RUNNING")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = client.get_search_job("abc123").await.unwrap();
    let entry = status.first_entry().unwrap();
    assert_eq!(entry.content.dispatch_state, DispatchState::Running);
    assert_eq!(entry.content.event_count, 100);
    assert_eq!(entry.content.result_count, 100);
    assert_eq!(entry.content.search, "search * TEST");
    assert_eq!(status.generator.version, "9.1.0");
}

#[tokio::test]
async fn test_get_search_job_encodes_sid() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("a/b", "DONE")))
        .expect(1)
        .mount(&mock_server)
        .await;

    client.get_search_job("a/b").await.unwrap();
}

#[tokio::test]
async fn test_get_search_job_404_is_api_error() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "messages": [{"type": "ERROR", "text": "Unknown sid."}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client.get_search_job("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("ERROR: Unknown sid."));
}

#[tokio::test]
async fn test_get_search_job_decode_error() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let err = client.get_search_job("abc123").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_wait_returns_immediately_when_done() {
    let mock_server = MockServer::start().await;
    mount_current_context(&mock_server).await;
    // A long interval proves no sleep happens before returning.
    let client = SplunkClient::builder()
        .base_url(mock_server.uri())
        .auth_strategy(token_auth())
        .job_poll_interval(Duration::from_secs(60))
        .build()
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("abc123", "DONE")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let started = Instant::now();
    let outcome = client
        .wait_for_job("abc123", &CancellationToken::new())
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    match outcome {
        WaitOutcome::Done(entry) => assert_eq!(entry.content.sid, "abc123"),
        WaitOutcome::NotFound => panic!("expected Done"),
    }
}

#[tokio::test]
async fn test_wait_polls_until_done() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("abc123", "QUEUED")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("abc123", "RUNNING")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("abc123", "DONE")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client
        .wait_for_job("abc123", &CancellationToken::new())
        .await
        .unwrap();
    assert!(outcome.is_done());
}

#[tokio::test]
async fn test_wait_not_found_on_zero_entries() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_job_status()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client
        .wait_for_job("gone", &CancellationToken::new())
        .await
        .unwrap();
    assert!(matches!(outcome, WaitOutcome::NotFound));
}

#[tokio::test]
async fn test_wait_surfaces_fetch_error_without_retry() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client
        .wait_for_job("abc123", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_wait_failed_job_reports_messages() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    let mut status = job_status("abc123", "FAILED");
    status["entry"][0]["content"]["messages"] =
        json!([{"type": "FATAL", "text": "Error in 'search' command"}]);

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client
        .wait_for_job("abc123", &CancellationToken::new())
        .await
        .unwrap_err();
    match err {
        ClientError::JobFailed { sid, messages } => {
            assert_eq!(sid, "abc123");
            assert_eq!(messages, vec!["FATAL: Error in 'search' command".to_string()]);
        }
        other => panic!("expected JobFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_cancel_interrupts_sleep() {
    let mock_server = MockServer::start().await;
    mount_current_context(&mock_server).await;
    let client = SplunkClient::builder()
        .base_url(mock_server.uri())
        .auth_strategy(token_auth())
        .job_poll_interval(Duration::from_secs(60))
        .build()
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("abc123", "RUNNING")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client.wait_for_job("abc123", &cancel),
    )
    .await
    .expect("wait should return promptly after cancel");

    assert!(matches!(result, Err(ClientError::Cancelled)));
}

#[tokio::test]
async fn test_wait_already_cancelled_makes_no_request() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status("abc123", "DONE")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = client.wait_for_job("abc123", &cancel).await.unwrap_err();
    assert!(err.is_cancelled());
}
