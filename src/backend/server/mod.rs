//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database connection and user store selection
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the loaded configuration, the user store, session keys
//! and the provider clients. It is cloned into every handler; the heavy parts
//! sit behind `Arc`.
//!
//! # Example
//!
//! ```rust,no_run
//! use alungu_ai::backend::server::create_app;
//! use alungu_ai::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database connection and user store selection
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{create_app, InitError};
pub use state::AppState;
