/**
 * Provider Status Handler
 *
 * `GET /api/status` reports which provider credentials are configured and
 * which features are usable with the current provider selection. No
 * provider is contacted.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::backend::middleware::AuthUser;
use crate::backend::providers::Providers;
use crate::shared::ProviderSelection;

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub huggingface: bool,
    pub openrouter: bool,
    pub replicate: bool,
    pub elevenlabs: bool,
    pub colab: bool,
    pub ollama: bool,
}

impl ServiceStatus {
    /// Names of configured services, in field order
    pub fn available(&self) -> Vec<&'static str> {
        [
            ("huggingface", self.huggingface),
            ("openrouter", self.openrouter),
            ("replicate", self.replicate),
            ("elevenlabs", self.elevenlabs),
            ("colab", self.colab),
            ("ollama", self.ollama),
        ]
        .into_iter()
        .filter_map(|(name, configured)| configured.then_some(name))
        .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct FeatureStatus {
    pub image_generation: bool,
    pub chat: bool,
    pub video_generation: bool,
    pub audio_generation: bool,
    pub model3d_generation: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub services: ServiceStatus,
    pub available_services: Vec<&'static str>,
    pub total_configured: usize,
    pub features: FeatureStatus,
    pub providers: ProviderSelection,
}

impl StatusResponse {
    pub fn from_providers(providers: &Providers) -> Self {
        let services = ServiceStatus {
            huggingface: providers.huggingface.is_configured(),
            openrouter: providers.openrouter.is_configured(),
            replicate: providers.replicate.is_configured(),
            elevenlabs: providers.elevenlabs.is_configured(),
            colab: providers.colab.is_configured(),
            ollama: providers.ollama.is_configured(),
        };
        let available_services = services.available();

        Self {
            success: true,
            total_configured: available_services.len(),
            available_services,
            services,
            features: FeatureStatus {
                image_generation: providers.image_available(),
                chat: providers.chat_available(),
                video_generation: providers.video_available(),
                audio_generation: providers.audio_available(),
                model3d_generation: providers.model3d_available(),
            },
            providers: providers.selection,
        }
    }
}

/// Status handler
pub async fn get_status(
    State(providers): State<Arc<Providers>>,
    AuthUser(user): AuthUser,
) -> Json<StatusResponse> {
    tracing::debug!("Status check by user {}", user.user_id);
    Json(StatusResponse::from_providers(&providers))
}
