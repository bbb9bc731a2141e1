//! Shared Error Types
//!
//! This module defines error types that are shared between the request schemas
//! and the HTTP layer. They describe input problems independently of how the
//! server eventually reports them.
//!
//! # Error Categories
//!
//! - `ValidationError` - One or more schema violations on a request body
//!
//! # Usage
//!
//! ```rust
//! use alungu_ai::shared::error::SharedError;
//!
//! // A single violation
//! let error = SharedError::validation("prompt", "Prompt is required");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One violated field of a request schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Name of the offending field (`body` when the payload itself is unreadable)
    pub field: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types for request handling
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Schema validation error
    #[error("Validation failed on {}", summarize(.violations))]
    ValidationError {
        /// Every violation found, in schema order
        violations: Vec<FieldViolation>,
    },
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SharedError {
    /// Create a validation error with a single violation
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    /// Create a validation error from collected violations
    pub fn violations(violations: Vec<FieldViolation>) -> Self {
        Self::ValidationError { violations }
    }
}
