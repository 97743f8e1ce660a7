// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end classification tests for the OpenAI adapter against wiremock.

use std::time::Duration;

use gameguru_config::model::OpenAiConfig;
use gameguru_core::{ChatTurn, CompletionAdapter, CompletionRequest, FailureKind};
use gameguru_openai::OpenAiProvider;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "sk-test-abcdefghijklmnopqrstuvwxyz";

fn provider(base_url: &str, timeout_secs: u64) -> OpenAiProvider {
    let config = OpenAiConfig {
        base_url: base_url.to_string(),
        timeout_secs,
        ..Default::default()
    };
    OpenAiProvider::with_key(&config, SecretString::from(KEY.to_string())).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        system_prompt: "You recommend board games.".into(),
        history: vec![
            ChatTurn::assistant("Hello! What do you like?"),
            ChatTurn::user("Something for four."),
            ChatTurn::assistant("Try Catan."),
        ],
        user_message: "Anything quicker?".into(),
    }
}

fn success_body(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo-0125",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
    })
}

async fn failure_kind(status: u16, body: serde_json::Value) -> FailureKind {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;
    provider(&server.uri(), 5)
        .complete(request())
        .await
        .unwrap_err()
        .kind()
}

#[tokio::test]
async fn success_returns_trimmed_text_and_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {KEY}").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_body(json!("\n  Try Sushi Go!  \n"))),
        )
        .mount(&server)
        .await;

    let response = provider(&server.uri(), 5).complete(request()).await.unwrap();
    assert_eq!(response.text, "Try Sushi Go!");
    assert_eq!(response.id, "chatcmpl-1");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().prompt_tokens, 42);
}

#[tokio::test]
async fn request_body_has_system_history_then_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 800,
            "messages": [
                {"role": "system", "content": "You recommend board games."},
                {"role": "assistant", "content": "Hello! What do you like?"},
                {"role": "user", "content": "Something for four."},
                {"role": "assistant", "content": "Try Catan."},
                {"role": "user", "content": "Anything quicker?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!("ok"))))
        .expect(1)
        .mount(&server)
        .await;

    provider(&server.uri(), 5).complete(request()).await.unwrap();
}

#[tokio::test]
async fn unauthorized_is_classified() {
    let body = json!({"error": {"message": "Incorrect API key provided: sk-test-ab****wxyz.", "type": "invalid_request_error", "code": "invalid_api_key"}});
    assert_eq!(failure_kind(401, body).await, FailureKind::Unauthorized);
}

#[tokio::test]
async fn rate_limit_is_classified_without_retry() {
    let body = json!({"error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}});
    assert_eq!(failure_kind(429, body).await, FailureKind::RateLimited);
}

#[tokio::test]
async fn insufficient_quota_is_classified() {
    let body = json!({"error": {"message": "You exceeded your current quota", "type": "insufficient_quota", "code": "insufficient_quota"}});
    assert_eq!(failure_kind(429, body).await, FailureKind::QuotaExceeded);
}

#[tokio::test]
async fn payment_required_is_quota() {
    assert_eq!(failure_kind(402, json!({})).await, FailureKind::QuotaExceeded);
}

#[tokio::test]
async fn server_error_is_classified_without_retry() {
    let body = json!({"error": {"message": "The server is overloaded", "type": "server_error"}});
    assert_eq!(failure_kind(503, body).await, FailureKind::ServerUnavailable);
}

#[tokio::test]
async fn other_status_is_unknown() {
    let body = json!({"error": {"message": "model not found", "type": "invalid_request_error"}});
    assert_eq!(failure_kind(404, body).await, FailureKind::UnknownError);
}

#[tokio::test]
async fn missing_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x", "choices": []})))
        .mount(&server)
        .await;
    let failure = provider(&server.uri(), 5).complete(request()).await.unwrap_err();
    assert_eq!(failure.kind(), FailureKind::MalformedResponse);
}

#[tokio::test]
async fn blank_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!("   "))))
        .mount(&server)
        .await;
    let failure = provider(&server.uri(), 5).complete(request()).await.unwrap_err();
    assert_eq!(failure.kind(), FailureKind::MalformedResponse);
}

#[tokio::test]
async fn non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;
    let failure = provider(&server.uri(), 5).complete(request()).await.unwrap_err();
    assert_eq!(failure.kind(), FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(json!("late")))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let failure = provider(&server.uri(), 1).complete(request()).await.unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Timeout);
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    // Bind then drop to get a local port with nothing listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let failure = provider(&format!("http://127.0.0.1:{port}"), 5)
        .complete(request())
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::NetworkError);
}

#[tokio::test]
async fn failure_detail_never_contains_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string(format!("echo {KEY}")))
        .mount(&server)
        .await;
    let failure = provider(&server.uri(), 5).complete(request()).await.unwrap_err();
    assert!(!failure.to_string().contains(KEY));
}
