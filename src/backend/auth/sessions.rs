/**
 * Session Management and JWT Tokens
 *
 * Sessions are stateless: a signed HS256 JWT carries the user identity and is
 * presented either as `Authorization: Bearer <token>` or in the
 * `session-token` cookie set at sign-in.
 */

use std::fmt;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session lifetime (30 days)
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session-token";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKeys { .. }")
    }
}

/// A freshly issued session token
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires: DateTime<Utc>,
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `keys` - Signing keys
/// * `user_id` - User ID (UUID)
/// * `email` - User email
/// * `name` - Display name carried into the session
///
/// # Returns
/// Token string and its expiry
pub fn create_token(
    keys: &SessionKeys,
    user_id: Uuid,
    email: &str,
    name: Option<&str>,
) -> Result<SessionToken, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires = now + Duration::seconds(SESSION_TTL_SECS);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        name: name.map(str::to_string),
        exp: expires.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(SessionToken { token, expires })
}

/// Verify and decode a JWT token
///
/// Expired tokens and tokens signed with another key are rejected.
pub fn verify_token(keys: &SessionKeys, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(token, &keys.decoding, &Validation::default())?;
    Ok(token_data.claims)
}

/// Find the session token of a request
///
/// The `Authorization` bearer token wins over the session cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, SESSION_TTL_SECS
    )
}

/// `Set-Cookie` value that removes the session cookie
pub fn cleared_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}
