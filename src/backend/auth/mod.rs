//! Authentication Module
//!
//! This module handles user registration, credentials sign-in and sessions.
//!
//! # Architecture
//!
//! - **`users`** - User model and the user store (Postgres or in-memory)
//! - **`sessions`** - JWT issue/verify and session cookie helpers
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user stored with a bcrypt hash
//! 2. **Login**: email, password → credentials verified → JWT returned and
//!    set as the `session-token` cookie
//! 3. **Guarded requests**: bearer token or cookie verified by
//!    `middleware::auth_middleware` before the handler runs
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens expire after 30 days
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and storage
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{get_session, login, logout, register};
pub use sessions::SessionKeys;
pub use users::{User, UserStore};
