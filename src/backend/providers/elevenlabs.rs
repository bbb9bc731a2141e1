/**
 * ElevenLabs Client
 *
 * Text-to-speech (`POST {base}/v1/text-to-speech/{voice_id}`), answered with
 * MP3 bytes. Authenticates with the `xi-api-key` header.
 */

use reqwest::{header::ACCEPT, Client};
use serde::Serialize;

use crate::backend::providers::client::{endpoint, require, send_bytes, BinaryPayload, ProviderError};
use crate::shared::config::ElevenLabsSettings;

const PROVIDER: &str = "elevenlabs";

#[derive(Debug, Serialize)]
pub struct SpeechRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
    pub speed: f64,
}

impl VoiceSettings {
    pub fn with_speed(speed: f64) -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            speed,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ElevenLabsClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    voice_id: String,
    model_id: String,
}

impl ElevenLabsClient {
    pub fn new(http: Client, settings: &ElevenLabsSettings) -> Self {
        Self {
            http,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            voice_id: settings.voice_id.clone(),
            model_id: settings.model_id.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn default_voice(&self) -> &str {
        &self.voice_id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn text_to_speech(
        &self,
        voice_id: &str,
        request: &SpeechRequest<'_>,
    ) -> Result<BinaryPayload, ProviderError> {
        let api_key = require(PROVIDER, "ELEVENLABS_API_KEY", self.api_key.as_ref())?;
        let url = endpoint(PROVIDER, &self.base_url, &["v1", "text-to-speech", voice_id])?;
        tracing::debug!("POST {}", url);

        let builder = self
            .http
            .post(url)
            .header("xi-api-key", api_key)
            .header(ACCEPT, "audio/mpeg")
            .json(request);
        send_bytes(PROVIDER, builder).await
    }
}
