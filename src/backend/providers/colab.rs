/**
 * Colab Tunnel Client
 *
 * Self-hosted notebook exposing Stable Diffusion, AnimateDiff, ModelScope,
 * Bark, MusicGen, threestudio and an Ollama proxy behind one base URL.
 * Every route takes a JSON body and answers with JSON.
 */

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::backend::providers::client::{require, send_json, ProviderError};
use crate::shared::config::ColabSettings;

const PROVIDER: &str = "colab";

/// Colab route paths
pub mod routes {
    pub const STABLE_DIFFUSION: &str = "/api/stable-diffusion/generate";
    pub const ANIMATEDIFF: &str = "/api/animatediff/generate";
    pub const MODELSCOPE: &str = "/api/modelscope/generate";
    pub const BARK: &str = "/api/bark/generate";
    pub const MUSICGEN: &str = "/api/musicgen/generate";
    pub const THREESTUDIO_CHARACTER: &str = "/api/threestudio/character";
    pub const THREESTUDIO_OBJECT: &str = "/api/threestudio/object";
    pub const OLLAMA_CHAT: &str = "/api/ollama/chat";
}

#[derive(Clone, Debug)]
pub struct ColabClient {
    http: Client,
    base_url: Option<String>,
    api_token: Option<String>,
}

impl ColabClient {
    pub fn new(http: Client, settings: &ColabSettings) -> Self {
        Self {
            http,
            base_url: settings.base_url.clone(),
            api_token: settings.api_token.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// POST `body` to `path` on the tunnel and return the decoded JSON
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ProviderError>
    where
        B: Serialize + ?Sized,
    {
        let base_url = require(PROVIDER, "COLAB_API_BASE_URL", self.base_url.as_ref())?;
        let url = format!("{}{}", base_url, path);
        tracing::debug!("POST {}", url);

        let mut request = self.http.post(url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        send_json(PROVIDER, request).await
    }
}
