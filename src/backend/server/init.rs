/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including storage selection, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Select the user store (Postgres if reachable, else in-memory)
 * 2. Build provider clients over one HTTP connection pool
 * 3. Create `AppState`
 * 4. Create and configure the router
 */

use axum::Router;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_user_store;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Startup failure
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to build provider HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Create and configure the Axum application
///
/// # Error Handling
///
/// - Missing or unreachable database: server continues on the in-memory store
/// - Migration failures: logged but don't prevent startup
/// - HTTP client construction failure: returned as `InitError`
pub async fn create_app(config: AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing Alungu AI backend server");

    let users = load_user_store(config.database_url.as_deref()).await;
    tracing::info!("User store: {}", users.backend_name());

    let providers = config.providers;
    let app_state = AppState::new(config, users)?;
    tracing::info!(
        "Providers: chat={} image={} video={} audio={}",
        providers.chat,
        providers.image,
        providers.video,
        providers.audio
    );

    Ok(create_router(app_state))
}
