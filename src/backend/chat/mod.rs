//! Chat Module
//!
//! Single-turn chat completions for `POST /api/chat`, served by a local
//! Ollama (with a Colab fallback) or by OpenRouter.
//!
//! ```text
//! chat/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - ChatRequest / ChatResponse
//! └── handlers.rs  - Provider dispatch and fallback
//! ```

pub mod handlers;
pub mod types;

pub use handlers::chat;
pub use types::{ChatRequest, ChatResponse};
