//! Authentication API integration tests
//!
//! Registration, sign-in, the session endpoint and the session guard.

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderValue, StatusCode,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{bearer, create_test_user, spawn_app, violated_fields};

#[tokio::test]
async fn test_register_success_stores_hash() {
    let app = spawn_app(&[]);

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "Ada@Example.com",
            "password": "analytical"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("User created successfully"));
    let user_id = body["userId"].as_str().expect("userId should be a string");

    let stored = app
        .state
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .expect("user should be stored under the lowercased email");
    assert_eq!(stored.id.to_string(), user_id);
    assert_eq!(stored.email, "ada@example.com");

    let hash = stored.password_hash.expect("hash should be stored");
    assert_ne!(hash, "analytical");
    assert!(bcrypt::verify("analytical", &hash).unwrap());
}

#[tokio::test]
async fn test_register_duplicate_email_any_case() {
    let app = spawn_app(&[]);
    let form = |email: &str| json!({ "name": "Ada", "email": email, "password": "analytical" });

    let first = app.server.post("/api/auth/register").json(&form("ada@example.com")).await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = app.server.post("/api/auth/register").json(&form("ADA@example.com")).await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = second.json();
    assert_eq!(body["error"], json!("User already exists with this email"));
}

#[tokio::test]
async fn test_register_short_password() {
    let app = spawn_app(&[]);

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "12345" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Password must be at least 6 characters"));
}

#[tokio::test]
async fn test_register_minimum_is_configurable() {
    let app = spawn_app(&[("MIN_PASSWORD_LENGTH", "10")]);

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "analytic" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Password must be at least 10 characters"));
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = spawn_app(&[]);

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "ada@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Missing required fields"));
    assert_eq!(violated_fields(&body), vec!["name", "password"]);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = spawn_app(&[]);

    let response = app
        .server
        .post("/api/auth/register")
        .bytes("{\"name\": ".into())
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(violated_fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = spawn_app(&[]);
    create_test_user(&app, "grace@example.com", "compiler").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "Grace@Example.com", "password": "compiler" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], json!("grace@example.com"));
    assert!(body["expires"].is_string());
    let token = body["token"].as_str().unwrap().to_string();

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login should set a cookie")
        .to_string();
    assert!(cookie.starts_with(&format!("session-token={}", token)));
    assert!(cookie.contains("HttpOnly"));

    let session = app
        .server
        .get("/api/auth/session")
        .add_header(COOKIE, HeaderValue::from_str(&format!("session-token={}", token)).unwrap())
        .await;
    assert_eq!(session.status_code(), StatusCode::OK);
    let body: Value = session.json();
    assert_eq!(body["user"]["email"], json!("grace@example.com"));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let app = spawn_app(&[]);
    create_test_user(&app, "grace@example.com", "compiler").await;

    for (email, password) in [("grace@example.com", "wrong-password"), ("nobody@example.com", "compiler")] {
        let response = app
            .server
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["error"], json!("Invalid credentials"));
    }
}

#[tokio::test]
async fn test_session_requires_token() {
    let app = spawn_app(&[]);

    let response = app.server.get("/api/auth/session").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Unauthorized"));
}

#[tokio::test]
async fn test_session_rejects_forged_token() {
    let app = spawn_app(&[]);
    let (name, value) = bearer("not.a.jwt");

    let response = app.server.get("/api/auth/session").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_with_bearer_token() {
    let app = spawn_app(&[]);
    let user = create_test_user(&app, "grace@example.com", "compiler").await;
    let (name, value) = user.bearer();

    let response = app.server.get("/api/auth/session").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["id"], json!(user.user.id.to_string()));
    assert_eq!(body["user"]["name"], json!("Test User"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = spawn_app(&[]);

    let response = app.server.post("/api/auth/logout").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app(&[]);

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["store"], json!("memory"));
}
