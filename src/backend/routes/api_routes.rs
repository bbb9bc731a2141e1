/**
 * API Route Handlers
 *
 * This module wires the API endpoints to their handlers.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - Credentials sign-in
 * - `POST /api/auth/logout` - Clear the session cookie
 *
 * ## Session required
 * - `GET /api/auth/session` - Current user
 * - `POST /api/chat` - Chat completion
 * - `POST /api/generate/image` - Image generation
 * - `POST /api/generate/video` - Video generation
 * - `GET /api/generate/video/{prediction_id}` - Replicate prediction lookup
 * - `POST /api/generate/audio` - Speech or music generation
 * - `POST /api/generate/3d` - 3D model generation
 * - `GET /api/status` - Provider status
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_session, login, logout, register};
use crate::backend::chat::chat;
use crate::backend::generate::{
    generate_audio, generate_image, generate_model3d, generate_video, get_video_prediction,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::status::get_status;

/// Configure API routes
///
/// Protected routes sit behind `auth_middleware` as a route layer, so an
/// unauthenticated request is answered with 401 before its body is read or
/// any provider is contacted.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/session", get(get_session))
        .route("/api/chat", post(chat))
        .route("/api/generate/image", post(generate_image))
        .route("/api/generate/video", post(generate_video))
        .route("/api/generate/video/{prediction_id}", get(get_video_prediction))
        .route("/api/generate/audio", post(generate_audio))
        .route("/api/generate/3d", post(generate_model3d))
        .route("/api/status", get(get_status))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .merge(protected)
}
