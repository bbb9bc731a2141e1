/**
 * Application State Management
 *
 * This module defines the main application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - Loaded configuration
 * - The user store (Postgres pool or in-memory fallback)
 * - Session signing keys
 * - Provider clients sharing one HTTP connection pool
 *
 * Everything except the in-memory user store is read-only after startup.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part of the
 * state they need:
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use alungu_ai::backend::providers::Providers;
 *
 * async fn handler(State(providers): State<Arc<Providers>>) {
 *     // only the provider clients
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::UserStore;
use crate::backend::providers::Providers;
use crate::shared::config::AppConfig;

/// Application state
///
/// # Fields
///
/// * `config` - Configuration loaded at startup
/// * `users` - User store for registration, sign-in and the session guard
/// * `session_keys` - JWT signing/verification keys
/// * `providers` - External generation service clients
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: UserStore,
    pub session_keys: SessionKeys,
    pub providers: Arc<Providers>,
}

impl AppState {
    /// Assemble state from already-built parts
    ///
    /// # Errors
    /// Fails when the provider HTTP client cannot be built.
    pub fn new(config: AppConfig, users: UserStore) -> Result<Self, reqwest::Error> {
        let providers = Providers::from_config(&config)?;
        let session_keys = SessionKeys::new(&config.jwt_secret);

        Ok(Self {
            config: Arc::new(config),
            users,
            session_keys,
            providers: Arc::new(providers),
        })
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for UserStore {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.session_keys.clone()
    }
}

impl FromRef<AppState> for Arc<Providers> {
    fn from_ref(state: &AppState) -> Self {
        state.providers.clone()
    }
}
