/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` logs every request/response pair
 * - `CorsLayer` lets the browser UI call the API from another origin
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::auth::users::UserStore;
use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Directory served under `/static`
pub const STATIC_DIR: &str = "public";

/// Create the Axum router with all routes configured
///
/// 1. **Health**: `GET /health`, unauthenticated liveness probe
/// 2. **API Routes**: authentication, chat, generation, status
/// 3. **Static Files**: `/static/*` from the public directory
/// 4. **Fallback Handler**: JSON 404 for unknown routes
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, app_state.clone());

    let router = router.nest_service("/static", ServeDir::new(STATIC_DIR));

    let router = router.fallback(not_found);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health(State(users): State<UserStore>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "store": users.backend_name(),
    }))
}

async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Not found")
}
