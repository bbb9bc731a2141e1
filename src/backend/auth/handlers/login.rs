/**
 * Login Handler
 *
 * This module implements credentials sign-in for `POST /api/auth/login`.
 *
 * # Authentication Process
 *
 * 1. Look up user by lowercased email
 * 2. Verify password using bcrypt
 * 3. Issue a JWT session token
 * 4. Return the token and set it as the session cookie
 *
 * # Security
 *
 * - Unknown email, account without password and wrong password all answer
 *   the same 401 so accounts cannot be enumerated
 * - Passwords are never logged or returned
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Json},
};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password missing
/// * `401 Unauthorized` - credentials do not match a user
/// * `500 Internal Server Error` - storage, hashing or token failure
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": "…", "name": "Ada", "email": "ada@example.com", "image": null },
///   "expires": "2026-11-18T10:00:00Z"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, BackendError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Email and password are required",
        ));
    }
    tracing::info!("Login request for: {}", request.email);

    let user = state
        .users
        .find_by_email(&request.email)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in failed")
        })?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            invalid_credentials()
        })?;

    let password_hash = user.password_hash.clone().ok_or_else(|| {
        tracing::warn!("User has no password credential: {}", user.email);
        invalid_credentials()
    })?;

    let password = request.password;
    let valid = tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in failed")
        })?
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in failed")
        })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", user.email);
        return Err(invalid_credentials());
    }

    let session = create_token(&state.session_keys, user.id, &user.email, Some(user.name.as_str()))
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in failed")
        })?;

    tracing::info!("User logged in successfully: {}", user.email);

    Ok((
        [(SET_COOKIE, session_cookie(&session.token))],
        Json(AuthResponse {
            token: session.token,
            user: UserResponse::from(&user),
            expires: session.expires,
        }),
    ))
}

fn invalid_credentials() -> BackendError {
    BackendError::handler(StatusCode::UNAUTHORIZED, "Invalid credentials")
}
