// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: gateway, assistant and the real OpenAI adapter talking
//! to a mock completion endpoint.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use gameguru_agent::{Assistant, SessionRegistry};
use gameguru_catalog::Catalog;
use gameguru_config::GameGuruConfig;
use gameguru_core::CompletionAdapter;
use gameguru_gateway::{router, GatewayState};
use gameguru_openai::OpenAiProvider;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "sk-e2e-0123456789abcdefghij";

async fn app_against(server: &MockServer) -> Router {
    let mut config = GameGuruConfig::default();
    config.openai.base_url = server.uri();
    config.openai.timeout_secs = 5;

    let provider: Arc<dyn CompletionAdapter> = Arc::new(
        OpenAiProvider::with_key(&config.openai, SecretString::from(KEY.to_string())).unwrap(),
    );
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let assistant = Arc::new(
        Assistant::from_config(&config, provider, catalog)
            .await
            .unwrap(),
    );
    let registry = Arc::new(SessionRegistry::new(assistant, &config.agent));
    router(GatewayState::new(registry, 0), &config.gateway.cors_origins)
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn session_turn_reaches_the_model_and_annotates_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header_eq("authorization", format!("Bearer {KEY}").as_str()))
        .respond_with(completion(
            "  For two players try Love Letter or Azul; Ticket to Ride scales up.  ",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_against(&server).await;

    let (status, session) = call(&app, Method::POST, "/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = session["id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/messages"),
        Some(json!({"text": "Something for two?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "replied");
    assert_eq!(
        body["message"]["text"],
        "For two players try Love Letter or Azul; Ticket to Ride scales up."
    );
    let names: Vec<&str> = body["message"]["recommended_games"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ticket to Ride", "Azul", "Love Letter"]);

    let received = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    let roles: Vec<&str> = sent["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["system", "assistant", "user"]);
    assert_eq!(sent["messages"][2]["content"], "Something for two?");
    assert_eq!(sent["model"], "gpt-3.5-turbo");
    assert_eq!(sent["max_tokens"], 800);
}

#[tokio::test]
async fn rejected_key_falls_back_with_shortlist_and_banner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;
    let app = app_against(&server).await;

    let (_, session) = call(&app, Method::POST, "/v1/sessions", None).await;
    let id = session["id"].as_str().unwrap();
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/messages"),
        Some(json!({"text": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "fell_back");
    assert_eq!(body["session"]["error"]["kind"], "unauthorized");
    let names: Vec<&str> = body["message"]["recommended_games"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ticket to Ride", "Azul", "Codenames"]);
    assert!(!body.to_string().contains(KEY));
}

#[tokio::test]
async fn chat_proxy_reports_quota_as_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "You exceeded your current quota",
                "type": "insufficient_quota",
                "code": "insufficient_quota"
            }
        })))
        .mount(&server)
        .await;
    let app = app_against(&server).await;

    let (status, body) =
        call(&app, Method::POST, "/api/chat", Some(json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "quota_exceeded");
}

#[tokio::test]
async fn health_reports_configured_provider() {
    let server = MockServer::start().await;
    let app = app_against(&server).await;
    let (status, body) = call(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["openaiConfigured"], true);
    assert_eq!(body["catalogSize"], 40);
}
