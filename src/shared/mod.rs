//! Shared Module
//!
//! This module contains types that are independent of the HTTP server:
//! configuration loading, error types, and the schema validation toolkit used
//! by every request body.
//!
//! # Overview
//!
//! Nothing in here touches axum, the database, or the network, so the types
//! can be unit tested in isolation and reused by the binary and the tests.

/// Shared error types
pub mod error;

/// Request schema validation
pub mod validation;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::{FieldViolation, SharedError};
pub use validation::{Validate, Validator};
pub use config::{AppConfig, ConfigError, ProviderSelection};
