/**
 * 3D Model Generation
 *
 * `POST /api/generate/3d`: threestudio on the Colab tunnel. Characters use a
 * dedicated route; products and objects share the object route.
 */

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::generate::envelope::{pick, upstream_failure, Envelope, Metadata};
use crate::backend::middleware::AuthUser;
use crate::backend::providers::colab::routes;
use crate::backend::server::state::AppState;
use crate::shared::{SharedError, Validate, Validator};

const FAILURE: &str = "Failed to generate 3D model";
const PROVIDER: &str = "colab";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Character,
    Product,
    #[default]
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStyle {
    #[default]
    Realistic,
    Stylized,
    LowPoly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Glb,
    Obj,
    Gltf,
}

/// Texture quality and polygon budget share one scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    #[default]
    Medium,
    High,
}

/// 3D request body with defaults applied
///
/// Serialized as-is for both the Colab payload and `metadata.settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model3dRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(rename = "type", default)]
    pub kind: ModelKind,
    #[serde(default)]
    pub style: ModelStyle,
    #[serde(default)]
    pub complexity: Complexity,
    /// Image for image-to-3D
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    /// Reference views from several angles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_images: Option<Vec<String>>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub texture_quality: Quality,
    #[serde(default)]
    pub polycount: Quality,
}

impl Validate for Model3dRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let mut v = Validator::new();
        v.required("prompt", &self.prompt, "Prompt is required");
        v.finish()
    }
}

impl Model3dRequest {
    fn route(&self) -> &'static str {
        match self.kind {
            ModelKind::Character => routes::THREESTUDIO_CHARACTER,
            ModelKind::Product | ModelKind::Object => routes::THREESTUDIO_OBJECT,
        }
    }
}

/// 3D generation handler
pub async fn generate_model3d(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<Model3dRequest>,
) -> Result<Envelope, BackendError> {
    request.validate()?;
    tracing::info!("3D generation ({:?}) for user {}", request.kind, user.user_id);

    let result = state
        .providers
        .colab
        .post(request.route(), &request)
        .await
        .map_err(|err| upstream_failure(err, FAILURE))?;

    let metadata = Metadata::new(&request, &user, PROVIDER)?.with("prompt", request.prompt.clone());
    Ok(Envelope::new()
        .field("model_url", pick(&result, "model_url"))
        .field("preview_url", pick(&result, "preview_url"))
        .field("generation_id", pick(&result, "id"))
        .metadata(metadata))
}
