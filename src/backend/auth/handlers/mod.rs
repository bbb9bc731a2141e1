//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - Credentials sign-in handler
//! └── session.rs   - Current session and logout handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`get_session`** - GET /api/auth/session (session required)
//! - **`logout`** - POST /api/auth/logout

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Session handlers
pub mod session;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, UserResponse};

// Re-export handlers
pub use login::login;
pub use register::register;
pub use session::{get_session, logout};
