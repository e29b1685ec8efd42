//! Integration tests for `splunk-search url`.
//!
//! The command is offline: none of these tests start a server.

mod common;

use common::splunk_cmd;
use predicates::prelude::*;

#[test]
fn test_url_strips_management_port() {
    splunk_cmd()
        .args(["url", "1700000000.42", "--base-url", "https://splunk.example.com:8089"])
        .assert()
        .success()
        .stdout("https://splunk.example.com/en-US/app/search/search?sid=1700000000.42\n");
}

#[test]
fn test_url_uses_web_base_url() {
    splunk_cmd()
        .args([
            "url",
            "TestID",
            "--base-url",
            "http://localhost:8090",
            "--web-base-url",
            "http://localhost:81/",
        ])
        .assert()
        .success()
        .stdout("http://localhost:81/en-US/app/search/search?sid=TestID\n");
}

#[test]
fn test_url_web_base_url_from_env_needs_no_api_url() {
    splunk_cmd()
        .env("SPLUNK_WEB_URL", "https://web.example.com")
        .args(["url", "abc"])
        .assert()
        .success()
        .stdout("https://web.example.com/en-US/app/search/search?sid=abc\n");
}

#[test]
fn test_url_needs_no_credentials() {
    splunk_cmd()
        .env_remove("SPLUNK_API_TOKEN")
        .args(["url", "abc", "--base-url", "http://localhost:8089"])
        .assert()
        .success();
}

#[test]
fn test_url_without_any_base_fails() {
    splunk_cmd()
        .args(["url", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Base URL is required"));
}
