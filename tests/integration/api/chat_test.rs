//! Chat API integration tests
//!
//! Provider dispatch, the Ollama → Colab fallback and the session guard.

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{create_test_user, forbid_any_call, mock_post_json, spawn_app, violated_fields, UNREACHABLE};

#[tokio::test]
async fn test_chat_requires_session_and_calls_nothing() {
    let provider = MockServer::start().await;
    forbid_any_call(&provider).await;
    let app = spawn_app(&[
        ("OLLAMA_ENDPOINT", provider.uri().as_str()),
        ("COLAB_API_BASE_URL", provider.uri().as_str()),
    ]);

    let response = app.server.post("/api/chat").json(&json!({ "message": "hello" })).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Unauthorized"));
}

#[tokio::test]
async fn test_chat_via_ollama() {
    let ollama = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3",
            "prompt": "Why is the sky blue?",
            "system": "Be brief",
            "options": { "temperature": 0.2, "num_predict": 1000 },
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3",
            "response": "Rayleigh scattering.",
            "done": true
        })))
        .expect(1)
        .mount(&ollama)
        .await;

    let app = spawn_app(&[("OLLAMA_ENDPOINT", ollama.uri().as_str())]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({
            "message": "Why is the sky blue?",
            "system_prompt": "Be brief",
            "temperature": 0.2,
            "conversation_id": "conv_existing"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Rayleigh scattering."));
    assert_eq!(body["conversation_id"], json!("conv_existing"));
    assert_eq!(body["metadata"]["model"], json!("llama3"));
    assert_eq!(body["metadata"]["provider"], json!("ollama"));
    assert_eq!(body["metadata"]["user_id"], json!(user.user.id.to_string()));
}

#[tokio::test]
async fn test_chat_falls_back_to_colab_once() {
    let colab = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ollama/chat"))
        .and(header("authorization", "Bearer colab-token"))
        .and(body_partial_json(json!({ "message": "hello", "model": "llama3", "max_tokens": 1000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "hi from colab" })))
        .expect(1)
        .mount(&colab)
        .await;

    let app = spawn_app(&[
        ("OLLAMA_ENDPOINT", UNREACHABLE),
        ("COLAB_API_BASE_URL", colab.uri().as_str()),
        ("COLAB_API_TOKEN", "colab-token"),
    ]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({ "message": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("hi from colab"));
    assert_eq!(body["metadata"]["provider"], json!("colab"));
    assert!(body["conversation_id"].as_str().unwrap().starts_with("conv_"));
}

#[tokio::test]
async fn test_chat_slow_primary_times_out_into_fallback() {
    let ollama = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "too late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&ollama)
        .await;
    let colab = MockServer::start().await;
    mock_post_json(&colab, "/api/ollama/chat", 200, json!({ "message": "on time" }), 1).await;

    let app = spawn_app(&[
        ("PROVIDER_TIMEOUT_SECS", "1"),
        ("OLLAMA_ENDPOINT", ollama.uri().as_str()),
        ("COLAB_API_BASE_URL", colab.uri().as_str()),
    ]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({ "message": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("on time"));
    assert_eq!(body["metadata"]["provider"], json!("colab"));
}

#[tokio::test]
async fn test_chat_unset_endpoint_uses_fallback() {
    let colab = MockServer::start().await;
    mock_post_json(&colab, "/api/ollama/chat", 200, json!({ "response": "fallback" }), 1).await;

    let app = spawn_app(&[("COLAB_API_BASE_URL", colab.uri().as_str())]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({ "message": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("fallback"));
}

#[tokio::test]
async fn test_chat_both_paths_failing_is_500() {
    let colab = MockServer::start().await;
    mock_post_json(&colab, "/api/ollama/chat", 503, json!({ "error": "busy" }), 1).await;

    let app = spawn_app(&[
        ("OLLAMA_ENDPOINT", UNREACHABLE),
        ("COLAB_API_BASE_URL", colab.uri().as_str()),
    ]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({ "message": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Failed to process chat message"));
}

#[tokio::test]
async fn test_chat_primary_http_error_skips_fallback() {
    let ollama = MockServer::start().await;
    mock_post_json(&ollama, "/api/generate", 500, json!({ "error": "model not found" }), 1).await;
    let colab = MockServer::start().await;
    forbid_any_call(&colab).await;

    let app = spawn_app(&[
        ("OLLAMA_ENDPOINT", ollama.uri().as_str()),
        ("COLAB_API_BASE_URL", colab.uri().as_str()),
    ]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({ "message": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_chat_validation_errors() {
    let provider = MockServer::start().await;
    forbid_any_call(&provider).await;
    let app = spawn_app(&[("OLLAMA_ENDPOINT", provider.uri().as_str())]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({ "message": "", "temperature": 3.0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Invalid input"));
    assert_eq!(violated_fields(&body), vec!["message", "temperature"]);
}

#[tokio::test]
async fn test_chat_via_openrouter() {
    let openrouter = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer or-key"))
        .and(body_partial_json(json!({
            "model": "meta-llama/llama-3.1-8b-instruct:free",
            "messages": [
                { "role": "system", "content": "Be brief" },
                { "role": "user", "content": "hello" }
            ],
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Hello!" } }]
        })))
        .expect(1)
        .mount(&openrouter)
        .await;

    let app = spawn_app(&[
        ("CHAT_PROVIDER", "openrouter"),
        ("OPENROUTER_API_KEY", "or-key"),
        ("OPENROUTER_BASE_URL", openrouter.uri().as_str()),
    ]);
    let user = create_test_user(&app, "chat@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app
        .server
        .post("/api/chat")
        .add_header(name, value)
        .json(&json!({ "message": "hello", "system_prompt": "Be brief" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("Hello!"));
    assert_eq!(body["metadata"]["provider"], json!("openrouter"));
    assert_eq!(body["metadata"]["model"], json!("meta-llama/llama-3.1-8b-instruct:free"));
}
