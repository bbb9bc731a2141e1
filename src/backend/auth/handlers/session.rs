/**
 * Session Handlers
 *
 * `GET /api/auth/session` returns the signed-in user; `POST /api/auth/logout`
 * drops the session cookie. Tokens are stateless, so logging out only affects
 * the browser that held the cookie.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::backend::auth::handlers::types::{SessionResponse, UserResponse};
use crate::backend::auth::sessions::cleared_session_cookie;
use crate::backend::auth::users::UserStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Get current session handler
///
/// Runs behind the session guard, so the user is already authenticated; the
/// record is re-read to return the current name and image.
pub async fn get_session(
    State(users): State<UserStore>,
    AuthUser(auth): AuthUser,
) -> Result<Json<SessionResponse>, BackendError> {
    let user = users
        .find_by_id(auth.user_id)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load session")
        })?
        .ok_or(BackendError::Unauthorized)?;

    Ok(Json(SessionResponse {
        user: UserResponse::from(&user),
        expires: auth.expires,
    }))
}

/// Logout handler
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, cleared_session_cookie())],
        Json(json!({ "success": true })),
    )
}
