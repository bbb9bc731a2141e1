//! Provider Clients Module
//!
//! Thin clients for the external generation services. Each client owns a
//! clone of one pooled `reqwest::Client` plus its own settings, and reports
//! whether its credentials are configured.
//!
//! # Module Structure
//!
//! ```text
//! providers/
//! ├── mod.rs          - Providers registry built from AppConfig
//! ├── client.rs       - ProviderError and shared send helpers
//! ├── colab.rs        - Colab tunnel (SD, AnimateDiff, Bark, threestudio, Ollama proxy)
//! ├── ollama.rs       - Self-hosted Ollama
//! ├── openrouter.rs   - OpenRouter chat completions
//! ├── huggingface.rs  - HuggingFace Inference API (FLUX.1-dev)
//! ├── replicate.rs    - Replicate predictions (Stable Video Diffusion)
//! └── elevenlabs.rs   - ElevenLabs text-to-speech
//! ```

pub mod client;
pub mod colab;
pub mod elevenlabs;
pub mod huggingface;
pub mod ollama;
pub mod openrouter;
pub mod replicate;

pub use client::{BinaryPayload, ProviderError};
pub use colab::ColabClient;
pub use elevenlabs::ElevenLabsClient;
pub use huggingface::HuggingFaceClient;
pub use ollama::OllamaClient;
pub use openrouter::OpenRouterClient;
pub use replicate::ReplicateClient;

use crate::shared::config::{
    AppConfig, AudioProvider, ChatProvider, ImageProvider, ProviderSelection, VideoProvider,
};

/// Every provider client, plus which one serves each feature
#[derive(Clone, Debug)]
pub struct Providers {
    pub selection: ProviderSelection,
    pub colab: ColabClient,
    pub ollama: OllamaClient,
    pub openrouter: OpenRouterClient,
    pub huggingface: HuggingFaceClient,
    pub replicate: ReplicateClient,
    pub elevenlabs: ElevenLabsClient,
}

impl Providers {
    /// Build all clients over one connection pool
    ///
    /// # Errors
    /// Fails only when the TLS backend cannot be initialised.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = client::build_http_client(config.provider_timeout)?;

        Ok(Self {
            selection: config.providers,
            colab: ColabClient::new(http.clone(), &config.colab),
            ollama: OllamaClient::new(http.clone(), &config.ollama),
            openrouter: OpenRouterClient::new(http.clone(), &config.openrouter),
            huggingface: HuggingFaceClient::new(http.clone(), &config.huggingface),
            replicate: ReplicateClient::new(http.clone(), &config.replicate),
            elevenlabs: ElevenLabsClient::new(http, &config.elevenlabs),
        })
    }

    /// Chat is usable when either the primary or its fallback is configured
    pub fn chat_available(&self) -> bool {
        match self.selection.chat {
            ChatProvider::Ollama => self.ollama.is_configured() || self.colab.is_configured(),
            ChatProvider::OpenRouter => self.openrouter.is_configured(),
        }
    }

    pub fn image_available(&self) -> bool {
        match self.selection.image {
            ImageProvider::HuggingFace => self.huggingface.is_configured(),
            ImageProvider::Colab => self.colab.is_configured(),
        }
    }

    pub fn video_available(&self) -> bool {
        match self.selection.video {
            VideoProvider::Colab => self.colab.is_configured(),
            VideoProvider::Replicate => self.replicate.is_configured(),
        }
    }

    pub fn audio_available(&self) -> bool {
        match self.selection.audio {
            AudioProvider::Colab => self.colab.is_configured(),
            AudioProvider::ElevenLabs => self.elevenlabs.is_configured(),
        }
    }

    /// 3D generation has a single backend
    pub fn model3d_available(&self) -> bool {
        self.colab.is_configured()
    }
}
