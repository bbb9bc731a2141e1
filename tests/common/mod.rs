//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Test application setup over the in-memory user store
//! - Mock provider helpers
//! - Authentication test helpers
//! - Response assertions

pub mod assertions;
pub mod auth_helpers;
pub mod mock_server;

use std::collections::HashMap;

use axum_test::TestServer;

use alungu_ai::backend::auth::UserStore;
use alungu_ai::backend::routes::create_router;
use alungu_ai::backend::server::AppState;
use alungu_ai::shared::AppConfig;

// Re-export commonly used utilities
pub use assertions::*;
pub use auth_helpers::*;
pub use mock_server::*;

/// A running test application
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Configuration for tests: fast bcrypt, fixed secret, short timeouts,
/// then the given overrides
pub fn test_config(overrides: &[(&str, &str)]) -> AppConfig {
    let mut env: HashMap<String, String> = [
        ("JWT_SECRET", "integration-test-secret"),
        ("BCRYPT_COST", "4"),
        ("PROVIDER_TIMEOUT_SECS", "5"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        env.insert(key.to_string(), value.to_string());
    }

    AppConfig::from_lookup(|key| env.get(key).cloned()).expect("test configuration must be valid")
}

/// Start the app with the in-memory user store
pub fn spawn_app(overrides: &[(&str, &str)]) -> TestApp {
    let state = AppState::new(test_config(overrides), UserStore::memory())
        .expect("provider client should build");
    let server = TestServer::new(create_router(state.clone())).expect("test server should start");

    TestApp { server, state }
}
