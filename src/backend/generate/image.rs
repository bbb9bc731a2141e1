/**
 * Image Generation
 *
 * `POST /api/generate/image`: text-to-image through HuggingFace FLUX.1-dev
 * (default) or the Colab Stable Diffusion route. The prompt is prefixed by
 * the chosen style before it is sent.
 */

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::generate::envelope::{
    data_uri, millis_id, pick, upstream_failure, Envelope, Metadata,
};
use crate::backend::middleware::AuthUser;
use crate::backend::providers::colab::routes;
use crate::backend::providers::huggingface::{
    TextToImageParameters, TextToImageRequest, FLUX_MODEL_NAME,
};
use crate::backend::providers::ProviderError;
use crate::backend::server::state::AppState;
use crate::shared::config::ImageProvider;
use crate::shared::{SharedError, Validate, Validator};

const FAILURE: &str = "Failed to generate image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Anime,
    #[default]
    Realistic,
    Artistic,
    Cinematic,
}

impl ImageStyle {
    /// Prompt prefix steering the model toward this style
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Realistic => "photorealistic, highly detailed, professional photography, ",
            Self::Anime => "anime style, manga illustration, detailed artwork, ",
            Self::Artistic => "artistic painting, creative illustration, vibrant colors, ",
            Self::Cinematic => "cinematic shot, dramatic lighting, film photography, ",
        }
    }
}

fn default_dimension() -> u32 {
    512
}

fn default_guidance_scale() -> f64 {
    7.5
}

fn default_steps() -> u32 {
    20
}

/// Image request body with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f64,
    #[serde(default = "default_steps")]
    pub num_inference_steps: u32,
    #[serde(default)]
    pub style: ImageStyle,
}

impl Validate for ImageRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let mut v = Validator::new();
        v.required("prompt", &self.prompt, "Prompt is required")
            .range("width", self.width, 256, 1024)
            .range("height", self.height, 256, 1024)
            .range("guidance_scale", self.guidance_scale, 1.0, 20.0)
            .range("num_inference_steps", self.num_inference_steps, 1, 50);
        v.finish()
    }
}

impl ImageRequest {
    /// Style prefix + prompt, with the negative prompt appended when given
    pub fn enhanced_prompt(&self) -> String {
        let mut prompt = format!("{}{}", self.style.prefix(), self.prompt);
        if let Some(negative) = self.negative_prompt.as_deref().filter(|n| !n.is_empty()) {
            prompt.push_str(". Negative: ");
            prompt.push_str(negative);
        }
        prompt
    }
}

/// Image generation handler
///
/// # Errors
///
/// * `400` - schema violations
/// * `500` - provider not configured or failed; the HuggingFace path returns
///   the upstream text in `details`
pub async fn generate_image(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<ImageRequest>,
) -> Result<Envelope, BackendError> {
    request.validate()?;

    let prompt = request.enhanced_prompt();
    let provider = state.providers.selection.image;
    tracing::info!("Image generation via {} for user {}", provider, user.user_id);

    match provider {
        ImageProvider::HuggingFace => {
            let huggingface = &state.providers.huggingface;
            if !huggingface.is_configured() {
                return Err(BackendError::handler(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "HuggingFace API token not configured",
                ));
            }

            let payload = huggingface
                .text_to_image(&TextToImageRequest {
                    inputs: &prompt,
                    parameters: TextToImageParameters {
                        guidance_scale: request.guidance_scale,
                        num_inference_steps: request.num_inference_steps,
                        width: request.width,
                        height: request.height,
                    },
                })
                .await
                .map_err(|err| match err {
                    ProviderError::Status { status, body, .. } => {
                        tracing::error!("HuggingFace API error {}: {}", status, body);
                        BackendError::upstream_with_details("Image generation failed", body)
                    }
                    other => upstream_failure(other, FAILURE),
                })?;

            let mime = payload
                .content_type
                .as_deref()
                .filter(|ct| ct.starts_with("image/"))
                .unwrap_or("image/png");

            let metadata = Metadata::new(&request, &user, provider.as_str())?
                .with("prompt", prompt.clone())
                .with("model", FLUX_MODEL_NAME);
            Ok(Envelope::new()
                .field("image_url", data_uri(mime, &payload.bytes))
                .field("generation_id", millis_id("hf"))
                .metadata(metadata))
        }
        ImageProvider::Colab => {
            let result = state
                .providers
                .colab
                .post(
                    routes::STABLE_DIFFUSION,
                    &json!({
                        "prompt": prompt,
                        "negative_prompt": request.negative_prompt,
                        "width": request.width,
                        "height": request.height,
                        "guidance_scale": request.guidance_scale,
                        "num_inference_steps": request.num_inference_steps,
                        "style": request.style,
                    }),
                )
                .await
                .map_err(|err| upstream_failure(err, FAILURE))?;

            let metadata = Metadata::new(&request, &user, provider.as_str())?.with("prompt", prompt.clone());
            Ok(Envelope::new()
                .field("image_url", pick(&result, "image_url"))
                .field("generation_id", pick(&result, "id"))
                .metadata(metadata))
        }
    }
}
