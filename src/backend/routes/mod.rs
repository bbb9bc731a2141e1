//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation, layers, static files and fallback
//! - **`api_routes`** - API endpoints, split into public and session-guarded
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint wiring
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use alungu_ai::backend::routes::create_router;
//! use alungu_ai::backend::auth::UserStore;
//! use alungu_ai::backend::server::AppState;
//! use alungu_ai::shared::AppConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(AppConfig::from_env()?, UserStore::memory())?;
//! let router = create_router(state);
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
