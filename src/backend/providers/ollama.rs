/**
 * Ollama Client
 *
 * Non-streaming completion against a self-hosted Ollama server
 * (`POST {endpoint}/api/generate`).
 */

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::backend::providers::client::{require, send_json, ProviderError};
use crate::shared::config::OllamaSettings;

const PROVIDER: &str = "ollama";

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    pub options: GenerateOptions,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateOptions {
    pub temperature: f64,
    pub num_predict: u32,
}

/// Reply from Ollama or the Colab proxy; the proxy answers with `message`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl GenerateReply {
    /// Reply text, preferring a non-empty `response`
    pub fn into_text(self) -> String {
        self.response
            .filter(|text| !text.is_empty())
            .or(self.message)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct OllamaClient {
    http: Client,
    endpoint: Option<String>,
}

impl OllamaClient {
    pub fn new(http: Client, settings: &OllamaSettings) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    pub async fn generate(&self, request: &GenerateRequest<'_>) -> Result<GenerateReply, ProviderError> {
        let endpoint = require(PROVIDER, "OLLAMA_ENDPOINT", self.endpoint.as_ref())?;
        let url = format!("{}/api/generate", endpoint);
        tracing::debug!("POST {} model={}", url, request.model);

        send_json(PROVIDER, self.http.post(url).json(request)).await
    }
}
