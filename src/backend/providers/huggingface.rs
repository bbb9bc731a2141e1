/**
 * HuggingFace Inference API Client
 *
 * Text-to-image through the hosted FLUX.1-dev model. The API answers with
 * the raw image bytes.
 */

use reqwest::Client;
use serde::Serialize;

use crate::backend::providers::client::{require, send_bytes, BinaryPayload, ProviderError};
use crate::shared::config::HuggingFaceSettings;

const PROVIDER: &str = "huggingface";

/// Model repository path
pub const FLUX_MODEL_PATH: &str = "black-forest-labs/FLUX.1-dev";

/// Short model name reported in response metadata
pub const FLUX_MODEL_NAME: &str = "FLUX.1-dev";

#[derive(Debug, Serialize)]
pub struct TextToImageRequest<'a> {
    pub inputs: &'a str,
    pub parameters: TextToImageParameters,
}

#[derive(Debug, Serialize)]
pub struct TextToImageParameters {
    pub guidance_scale: f64,
    pub num_inference_steps: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug)]
pub struct HuggingFaceClient {
    http: Client,
    api_token: Option<String>,
    base_url: String,
}

impl HuggingFaceClient {
    pub fn new(http: Client, settings: &HuggingFaceSettings) -> Self {
        Self {
            http,
            api_token: settings.api_token.clone(),
            base_url: settings.base_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }

    pub async fn text_to_image(
        &self,
        request: &TextToImageRequest<'_>,
    ) -> Result<BinaryPayload, ProviderError> {
        let token = require(PROVIDER, "HUGGINGFACE_API_TOKEN", self.api_token.as_ref())?;
        let url = format!("{}/models/{}", self.base_url, FLUX_MODEL_PATH);
        tracing::debug!("POST {}", url);

        send_bytes(PROVIDER, self.http.post(url).bearer_auth(token).json(request)).await
    }
}
