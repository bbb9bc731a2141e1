//! Backend Error Module
//!
//! This module defines the error type used by HTTP handlers and its
//! conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Kinds
//!
//! - `HandlerError` - explicit status chosen by a handler
//! - `Unauthorized` - session guard rejection (401)
//! - `InvalidInput` / `SharedError` - schema violations (400)
//! - `Upstream` - provider failures (500)
//! - `SerializationError` - internal failures (500)

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
