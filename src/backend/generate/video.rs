/**
 * Video Generation
 *
 * `POST /api/generate/video` runs AnimateDiff/ModelScope on the Colab tunnel
 * (default) or creates a Stable Video Diffusion prediction on Replicate.
 * `GET /api/generate/video/{prediction_id}` reads a Replicate prediction back
 * once; callers poll it themselves.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::generate::envelope::{pick, upstream_failure, Envelope, Metadata};
use crate::backend::middleware::AuthUser;
use crate::backend::providers::client::is_path_safe_id;
use crate::backend::providers::colab::routes;
use crate::backend::providers::replicate::{motion_bucket_id, Prediction, SvdInput};
use crate::backend::providers::ProviderError;
use crate::backend::server::state::AppState;
use crate::shared::config::VideoProvider;
use crate::shared::{FieldViolation, SharedError, Validate, Validator};

const FAILURE: &str = "Failed to generate video";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    #[default]
    Animation,
    Realistic,
}

impl VideoKind {
    fn colab_route(self) -> &'static str {
        match self {
            Self::Animation => routes::ANIMATEDIFF,
            Self::Realistic => routes::MODELSCOPE,
        }
    }
}

fn default_duration() -> u32 {
    3
}

fn default_fps() -> u32 {
    24
}

fn default_dimension() -> u32 {
    512
}

fn default_motion_strength() -> f64 {
    0.7
}

/// Video request body with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRequest {
    #[serde(default)]
    pub prompt: String,
    /// Seconds
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    #[serde(default = "default_motion_strength")]
    pub motion_strength: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: VideoKind,
    /// URL or base64 image for image-to-video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
}

impl Validate for VideoRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let mut v = Validator::new();
        v.required("prompt", &self.prompt, "Prompt is required")
            .range("duration", self.duration, 1, 10)
            .range("fps", self.fps, 12, 30)
            .range("width", self.width, 256, 1024)
            .range("height", self.height, 256, 1024)
            .range("motion_strength", self.motion_strength, 0.0, 1.0);
        v.finish()
    }
}

/// Video generation handler
pub async fn generate_video(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<VideoRequest>,
) -> Result<Envelope, BackendError> {
    request.validate()?;

    let provider = state.providers.selection.video;
    tracing::info!("Video generation via {} for user {}", provider, user.user_id);

    match provider {
        VideoProvider::Colab => {
            let result = state
                .providers
                .colab
                .post(
                    request.kind.colab_route(),
                    &json!({
                        "prompt": request.prompt,
                        "duration": request.duration,
                        "fps": request.fps,
                        "width": request.width,
                        "height": request.height,
                        "motion_strength": request.motion_strength,
                        "seed": request.seed.unwrap_or(-1),
                        "base_image": request.base_image,
                    }),
                )
                .await
                .map_err(|err| upstream_failure(err, FAILURE))?;

            let metadata =
                Metadata::new(&request, &user, provider.as_str())?.with("prompt", request.prompt.clone());
            Ok(Envelope::new()
                .field("video_url", pick(&result, "video_url"))
                .field("generation_id", pick(&result, "id"))
                .metadata(metadata))
        }
        VideoProvider::Replicate => {
            let base_image = request
                .base_image
                .as_deref()
                .filter(|image| !image.trim().is_empty())
                .ok_or_else(|| {
                    BackendError::invalid_input(
                        "Invalid input",
                        vec![FieldViolation::new(
                            "base_image",
                            "base_image is required for image-to-video generation",
                        )],
                    )
                })?;

            let replicate = &state.providers.replicate;
            if !replicate.is_configured() {
                return Err(BackendError::handler(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Replicate API token not configured",
                ));
            }

            let prediction = replicate
                .create_prediction(SvdInput {
                    input_image: base_image,
                    frames_per_second: request.fps,
                    motion_bucket_id: motion_bucket_id(request.motion_strength),
                    seed: request.seed,
                })
                .await
                .map_err(|err| upstream_failure(err, FAILURE))?;
            tracing::info!("Replicate prediction {} is {}", prediction.id, prediction.status);

            let metadata =
                Metadata::new(&request, &user, provider.as_str())?.with("prompt", request.prompt.clone());
            Ok(Envelope::new()
                .field("prediction_id", prediction.id.clone())
                .field("status", prediction.status.clone())
                .field("video_url", prediction.video_url().map_or(Value::Null, Value::String))
                .field("generation_id", prediction.id)
                .metadata(metadata))
        }
    }
}

/// Prediction lookup handler
///
/// # Errors
///
/// * `400` - the id is not a Replicate prediction id
/// * `404` - Replicate does not know the prediction
/// * `500` - Replicate not configured or unreachable
pub async fn get_video_prediction(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(prediction_id): Path<String>,
) -> Result<Envelope, BackendError> {
    let mut v = Validator::new();
    v.check(
        is_path_safe_id(&prediction_id),
        "prediction_id",
        "prediction_id may only contain letters, digits, '_' and '-'",
    );
    v.finish()?;

    let replicate = &state.providers.replicate;
    if !replicate.is_configured() {
        return Err(BackendError::handler(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Replicate API token not configured",
        ));
    }

    let prediction: Prediction = replicate
        .get_prediction(&prediction_id)
        .await
        .map_err(|err| match err {
            ProviderError::Status { status: 404, .. } => {
                BackendError::handler(StatusCode::NOT_FOUND, "Prediction not found")
            }
            other => upstream_failure(other, "Failed to fetch prediction"),
        })?;

    let mut envelope = Envelope::new()
        .field("prediction_id", prediction.id.clone())
        .field("status", prediction.status.clone())
        .field("video_url", prediction.video_url().map_or(Value::Null, Value::String));
    if let Some(error) = prediction.error.filter(|e| !e.is_null()) {
        envelope = envelope.field("error", error);
    }
    Ok(envelope)
}
