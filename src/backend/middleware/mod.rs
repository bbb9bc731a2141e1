//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Session guard for protected routes and the `AuthUser`
//!   extractor handlers use to read the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware;
//! use alungu_ai::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/api/status", get(status))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
