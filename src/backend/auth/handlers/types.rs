/**
 * Authentication Handler Types
 *
 * Request and response bodies of the authentication endpoints.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Registration request
///
/// Missing fields deserialize as empty strings so that the handler can
/// report every absent field instead of failing on the first.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address (lowercased before storage)
    pub email: String,
    /// Password (hashed before storage)
    pub password: String,
}

/// Registration response
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Credentials sign-in request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sign-in response
///
/// The same token is also set as the `session-token` cookie.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    /// JWT token (30-day expiration)
    pub token: String,
    pub user: UserResponse,
    pub expires: DateTime<Utc>,
}

/// Current session
#[derive(Serialize, Debug)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub expires: DateTime<Utc>,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
        }
    }
}
