/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 *
 * # Error Categories
 *
 * The API distinguishes three kinds of failure:
 *
 * - **Input validation** (400) - the body does not match the endpoint schema;
 *   reported with structured per-field details
 * - **Authorization** (401) - no valid session accompanies the request
 * - **Upstream** (500) - the provider call failed or answered with a
 *   non-success status
 *
 * Serialization failures also surface as 500 with a generic
 * message so that internals never leak to the client.
 */

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::shared::{FieldViolation, SharedError};

/// Backend-specific error types
///
/// Each variant maps to one HTTP status code and can be returned directly
/// from an axum handler (see `conversion.rs`).
///
/// # Usage
///
/// ```rust
/// use alungu_ai::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "User already exists with this email");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::upstream("Failed to generate video");
/// assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing, invalid or expired session
    #[error("Unauthorized")]
    Unauthorized,

    /// Request body violated its schema
    #[error("{message}")]
    InvalidInput {
        /// Summary shown as the `error` field
        message: String,
        /// Offending fields
        violations: Vec<FieldViolation>,
    },

    /// Provider call failed
    ///
    /// `details` carries upstream text only where the endpoint chooses to
    /// expose it.
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        details: Option<String>,
    },

    /// Schema validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create an input validation error with a custom summary
    pub fn invalid_input(message: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            violations,
        }
    }

    /// Create an upstream error with a generic message
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            details: None,
        }
    }

    /// Create an upstream error that exposes the provider's text
    pub fn upstream_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Unauthorized` - 401
    /// - `InvalidInput` and `SharedError::ValidationError` - 400
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::InvalidInput { message, .. } => message.clone(),
            Self::Upstream { message, .. } => message.clone(),
            Self::SharedError(SharedError::ValidationError { .. }) => "Invalid input".to_string(),
            Self::SerializationError(_) => "Internal server error".to_string(),
        }
    }

    /// Get the optional `details` payload of the error response
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::InvalidInput { violations, .. }
            | Self::SharedError(SharedError::ValidationError { violations }) => {
                serde_json::to_value(violations).ok()
            }
            Self::Upstream {
                details: Some(details),
                ..
            } => Some(Value::String(details.clone())),
            _ => None,
        }
    }
}
