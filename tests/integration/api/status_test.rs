//! Status API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_user, spawn_app};

#[tokio::test]
async fn test_status_requires_session() {
    let app = spawn_app(&[]);

    let response = app.server.get("/api/status").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_reports_configured_services() {
    let app = spawn_app(&[
        ("OPENROUTER_API_KEY", "or-key"),
        ("REPLICATE_API_TOKEN", "r8-token"),
        ("CHAT_PROVIDER", "openrouter"),
        ("VIDEO_PROVIDER", "replicate"),
    ]);
    let user = create_test_user(&app, "ops@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app.server.get("/api/status").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["services"],
        json!({
            "huggingface": false,
            "openrouter": true,
            "replicate": true,
            "elevenlabs": false,
            "colab": false,
            "ollama": false
        })
    );
    assert_eq!(body["available_services"], json!(["openrouter", "replicate"]));
    assert_eq!(body["total_configured"], json!(2));
    assert_eq!(
        body["features"],
        json!({
            "image_generation": false,
            "chat": true,
            "video_generation": true,
            "audio_generation": false,
            "model3d_generation": false
        })
    );
    assert_eq!(
        body["providers"],
        json!({
            "chat": "openrouter",
            "image": "huggingface",
            "video": "replicate",
            "audio": "colab"
        })
    );
}

#[tokio::test]
async fn test_status_with_nothing_configured() {
    let app = spawn_app(&[]);
    let user = create_test_user(&app, "ops@example.com", "password1").await;
    let (name, value) = user.bearer();

    let response = app.server.get("/api/status").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total_configured"], json!(0));
    assert_eq!(body["available_services"], json!([]));
    assert_eq!(body["features"]["chat"], json!(false));
}
