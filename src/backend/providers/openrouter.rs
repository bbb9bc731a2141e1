/**
 * OpenRouter Client
 *
 * OpenAI-compatible chat completions (`POST {base}/v1/chat/completions`).
 */

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::backend::providers::client::{require, send_json, ProviderError};
use crate::shared::config::OpenRouterSettings;

const PROVIDER: &str = "openrouter";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    default_model: String,
}

impl OpenRouterClient {
    pub fn new(http: Client, settings: &OpenRouterSettings) -> Self {
        Self {
            http,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            default_model: settings.model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model used when a chat request names none
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Run one completion and return the first choice's content
    pub async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError> {
        let api_key = require(PROVIDER, "OPENROUTER_API_KEY", self.api_key.as_ref())?;
        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::debug!("POST {} model={}", url, request.model);

        let builder = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .header("X-Title", "Alungu AI")
            .json(request);
        let response: CompletionResponse = send_json(PROVIDER, builder).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Decode {
                provider: PROVIDER,
                message: "response contained no choices".to_string(),
            })
    }
}
