use crate::client::{fallback, RetryPolicy, SummaryClient, SummaryInput};
use std::time::Duration;

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
        max_jitter: Duration::from_millis(1),
    }
}

fn input() -> SummaryInput {
    SummaryInput {
        company_name: "Acme Ltd".to_string(),
        website: "https://acme.com".to_string(),
        tone: "Professional".to_string(),
        page_title: "Acme — Widgets".to_string(),
        meta_description: "Industrial widgets and fasteners for heavy machinery.".to_string(),
        page_text: "Acme makes widgets.".to_string(),
    }
}

fn client_for(server: &mockito::Server) -> SummaryClient {
    SummaryClient::new(Some("test-key".to_string()), "gpt-4.1-mini")
        .with_base_url(server.url())
        .with_retry_policy(fast_retry())
}

const REPLY: &str = r#"{
    "output": [
        {"type": "message", "content": [
            {"type": "output_text", "text": "Acme manufactures   industrial widgets."}
        ]}
    ]
}"#;

// ---------------------------------------------------------------------------
// Fallback ladder
// ---------------------------------------------------------------------------

#[test]
fn fallback_prefers_substantial_meta_description() {
    assert_eq!(
        fallback(&input()),
        "Industrial widgets and fasteners for heavy machinery."
    );
}

#[test]
fn fallback_uses_name_sentence_when_meta_is_short() {
    let mut i = input();
    i.meta_description = "Widgets.".to_string();
    assert_eq!(
        fallback(&i),
        "Acme Ltd — demo environment based on publicly available information."
    );
}

#[test]
fn fallback_is_generic_without_title() {
    let mut i = input();
    i.meta_description = String::new();
    i.page_title = "   ".to_string();
    assert_eq!(fallback(&i), "Demo environment for this company.");
}

// ---------------------------------------------------------------------------
// No credentials
// ---------------------------------------------------------------------------

#[test]
fn missing_key_skips_network_entirely() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/v1/responses").expect(0).create();

    let client = SummaryClient::new(None, "gpt-4.1-mini")
        .with_base_url(server.url())
        .with_retry_policy(fast_retry());
    let summary = client.summarize(&input());

    assert_eq!(summary, fallback(&input()));
    mock.assert();
}

#[test]
fn blank_key_counts_as_missing() {
    let client = SummaryClient::new(Some("   ".to_string()), "gpt-4.1-mini");
    assert_eq!(client.summarize(&input()), fallback(&input()));
}

// ---------------------------------------------------------------------------
// API behavior
// ---------------------------------------------------------------------------

#[test]
fn success_returns_collapsed_text() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPLY)
        .expect(1)
        .create();

    let summary = client_for(&server).summarize(&input());
    assert_eq!(summary, "Acme manufactures industrial widgets.");
    mock.assert();
}

#[test]
fn empty_output_falls_back_without_retrying() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output": []}"#)
        .expect(1)
        .create();

    let summary = client_for(&server).summarize(&input());
    assert_eq!(summary, fallback(&input()));
    mock.assert();
}

#[test]
fn rate_limiting_retries_until_attempts_are_exhausted() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(429)
        .with_header("retry-after", "0")
        .expect(3)
        .create();

    let summary = client_for(&server).summarize(&input());
    assert_eq!(summary, fallback(&input()));
    mock.assert();
}

#[test]
fn server_errors_are_retried() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(503)
        .expect(3)
        .create();

    let summary = client_for(&server).summarize(&input());
    assert_eq!(summary, fallback(&input()));
    mock.assert();
}

#[test]
fn client_errors_fall_back_immediately() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(400)
        .with_body(r#"{"error": {"message": "bad request"}}"#)
        .expect(1)
        .create();

    let summary = client_for(&server).summarize(&input());
    assert_eq!(summary, fallback(&input()));
    mock.assert();
}

#[test]
fn connection_failures_degrade_to_fallback() {
    // Nothing listens on this port; every attempt is a network error.
    let client = SummaryClient::new(Some("test-key".to_string()), "gpt-4.1-mini")
        .with_base_url("http://127.0.0.1:9")
        .with_retry_policy(fast_retry());

    assert_eq!(client.summarize(&input()), fallback(&input()));
}
