//! Authentication test helpers

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};

use alungu_ai::backend::auth::sessions::create_token;
use alungu_ai::backend::auth::users::{NewUser, User};

use super::TestApp;

/// User seeded straight into the store, with a valid session token
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    /// `Authorization: Bearer <token>` header pair
    pub fn bearer(&self) -> (HeaderName, HeaderValue) {
        bearer(&self.token)
    }
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is a valid header value"),
    )
}

/// Insert a user with a bcrypt hash and sign a token for it
pub async fn create_test_user(app: &TestApp, email: &str, password: &str) -> TestUser {
    let password_hash = bcrypt::hash(password, 4).expect("hashing should succeed");
    let user = app
        .state
        .users
        .create_user(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await
        .expect("user should be created");

    let session = create_token(&app.state.session_keys, user.id, &user.email, Some(user.name.as_str()))
        .expect("token should be created");

    TestUser {
        user,
        token: session.token,
    }
}
