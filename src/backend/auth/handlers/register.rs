/**
 * Registration Handler
 *
 * This module implements `POST /api/auth/register`.
 *
 * # Registration Process
 *
 * 1. Check that name, email and password are present
 * 2. Check email shape and password length
 * 3. Reject an email that is already registered
 * 4. Hash the password with bcrypt
 * 5. Store the user and return its ID
 *
 * Registration does not sign the user in; the client follows up with
 * `POST /api/auth/login`.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::users::{NewUser, UserStoreError};
use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::server::state::AppState;
use crate::shared::{FieldViolation, Validator};

impl RegisterRequest {
    /// Check the registration form
    ///
    /// Absent fields are reported together under "Missing required fields";
    /// shape problems are reported only once every field is present.
    pub fn check(&self, min_password_length: usize) -> Result<(), BackendError> {
        let mut missing = Validator::new();
        missing
            .required("name", &self.name, "Name is required")
            .required("email", &self.email, "Email is required")
            .required("password", &self.password, "Password is required");
        let violations = missing.into_violations();
        if !violations.is_empty() {
            return Err(BackendError::invalid_input("Missing required fields", violations));
        }

        if !self.email.contains('@') {
            return Err(BackendError::invalid_input(
                "Invalid email format",
                vec![FieldViolation::new("email", "Invalid email format")],
            ));
        }

        if self.password.chars().count() < min_password_length {
            let message = format!("Password must be at least {} characters", min_password_length);
            return Err(BackendError::invalid_input(
                message.clone(),
                vec![FieldViolation::new("password", message)],
            ));
        }

        Ok(())
    }
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - missing fields, bad email, short password, or the
///   email is already registered
/// * `500 Internal Server Error` - hashing or storage failed
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Ada", "email": "ada@example.com", "password": "hunter22" }
/// ```
///
/// # Example Response (201)
///
/// ```json
/// { "message": "User created successfully", "userId": "5f0c..." }
/// ```
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    request.check(state.config.min_password_length)?;
    tracing::info!("Registration request for: {}", request.email);

    let existing = state.users.find_by_email(&request.email).await.map_err(|e| {
        tracing::error!("User lookup failed: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user")
    })?;
    if existing.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(already_exists());
    }

    let cost = state.config.bcrypt_cost;
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user")
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user")
        })?;

    let user = state
        .users
        .create_user(NewUser {
            name: request.name.trim().to_string(),
            email: request.email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            UserStoreError::DuplicateEmail(email) => {
                tracing::warn!("Email registered concurrently: {}", email);
                already_exists()
            }
            UserStoreError::Database(e) => {
                tracing::error!("Failed to create user: {:?}", e);
                BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user")
            }
        })?;

    tracing::info!("User created successfully: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id: user.id.to_string(),
        }),
    ))
}

fn already_exists() -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, "User already exists with this email")
}
