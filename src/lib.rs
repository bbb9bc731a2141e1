//! Alungu AI - Main Library
//!
//! Alungu AI is the backend of a generative-AI dashboard. Signed-in users
//! submit prompts for images, video, audio, 3D models and chat; the server
//! validates each request, forwards it to a third-party inference provider,
//! and reshapes the provider's reply into one uniform envelope.
//!
//! # Overview
//!
//! This library provides:
//! - Credentials registration and sign-in with bcrypt-hashed passwords
//! - JWT sessions accepted from a bearer header or a session cookie
//! - Schema validation with per-field error details
//! - Provider clients for HuggingFace, Replicate, ElevenLabs, OpenRouter,
//!   Ollama and a Colab tunnel
//! - Axum handlers for the chat, generation and status endpoints
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration, error types and validation helpers
//! - **`backend`** - Axum server, authentication, providers and handlers
//!
//! # Usage
//!
//! ```rust,no_run
//! use alungu_ai::backend::server::init::create_app;
//! use alungu_ai::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Statelessness
//!
//! Generation requests are never persisted. Each request is validated,
//! forwarded and answered; long-running provider jobs are represented only by
//! the provider's own identifier. The only durable state is the user table.

/// Shared types and helpers
pub mod shared;

/// Backend server-side code
pub mod backend;
