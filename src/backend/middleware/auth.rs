/**
 * Authentication Middleware
 *
 * Session guard for every protected route. It resolves the session token
 * from the `Authorization` header or the session cookie, verifies it, and
 * attaches the caller to the request extensions before any body is read.
 * A guarded handler therefore never runs, and never reaches a provider,
 * for an unauthenticated request.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::auth::sessions::{token_from_headers, verify_token};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// Session expiry carried by the token
    pub expires: DateTime<Utc>,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token (bearer header first, then cookie)
/// 2. Verifies signature and expiry
/// 3. Confirms the user still exists
/// 4. Attaches `AuthenticatedUser` to request extensions
///
/// Returns 401 `{"error":"Unauthorized"}` if any step fails
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = token_from_headers(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing session token");
        BackendError::Unauthorized
    })?;

    let claims = verify_token(&app_state.session_keys, &token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::Unauthorized
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::Unauthorized
    })?;

    match app_state.users.find_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!("Session for unknown user: {}", user_id);
            return Err(BackendError::Unauthorized);
        }
        Err(e) => {
            tracing::error!("User lookup failed during session check: {:?}", e);
            return Err(BackendError::Unauthorized);
        }
    }

    let expires = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        name: claims.name,
        expires,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only meaningful on routes behind [`auth_middleware`]; anywhere else it
/// rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthorized
            })
    }
}
