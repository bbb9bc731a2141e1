//! Backend Module
//!
//! This module contains all server-side code for the Alungu AI gateway: an
//! Axum HTTP server that authenticates users, validates generation requests
//! and forwards them to external generative-AI services.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, storage setup
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, sign-in, JWT sessions, user store
//! - **`middleware`** - Session guard for protected routes
//! - **`chat`** - Chat completions with the Ollama → Colab fallback
//! - **`generate`** - Image, video, audio and 3D generation
//! - **`status`** - Provider configuration report
//! - **`providers`** - HTTP clients for the external services
//! - **`extract`** - JSON body extractor with structured rejections
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── chat/           - Chat handler
//! ├── generate/       - Generation handlers and response envelope
//! ├── status/         - Status handler
//! ├── providers/      - External service clients
//! ├── extract.rs      - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Every guarded handler performs: session check (401) → JSON parse and
//! schema validation (400) → one provider call, plus at most one fallback
//! for chat → response normalized into the uniform envelope (or 500).

pub mod auth;
pub mod chat;
pub mod error;
pub mod extract;
pub mod generate;
pub mod middleware;
pub mod providers;
pub mod routes;
pub mod server;
pub mod status;

pub use error::BackendError;
pub use server::{create_app, AppState};
