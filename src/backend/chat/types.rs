/**
 * Chat Types
 *
 * Request and response bodies for `POST /api/chat`.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::{SharedError, Validate, Validator};

/// Model used with Ollama when the request names none
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

/// Chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    /// Defaults per provider, resolved by the handler
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Validate for ChatRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let mut v = Validator::new();
        v.required("message", &self.message, "Message is required")
            .range("temperature", self.temperature, 0.0, 2.0)
            .range("max_tokens", self.max_tokens, 1, 4000);
        v.finish()
    }
}

/// Chat response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    pub conversation_id: String,
    pub metadata: ChatMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMetadata {
    pub model: String,
    /// Provider that produced the reply; `colab` when the fallback answered
    pub provider: String,
    pub generated_at: String,
    pub user_id: Uuid,
}
