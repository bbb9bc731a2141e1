/**
 * Replicate Client
 *
 * Image-to-video through Stable Video Diffusion predictions. A prediction is
 * created with `POST /v1/predictions` and may be read back with
 * `GET /v1/predictions/{id}`; no polling happens here.
 */

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::providers::client::{endpoint, require, send_json, ProviderError};
use crate::shared::config::ReplicateSettings;

const PROVIDER: &str = "replicate";

#[derive(Debug, Serialize)]
pub struct SvdInput<'a> {
    pub input_image: &'a str,
    pub frames_per_second: u32,
    pub motion_bucket_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreatePrediction<'a> {
    version: &'a str,
    input: SvdInput<'a>,
}

/// Prediction record as returned by Replicate
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl Prediction {
    /// Video URL once the prediction has produced output
    ///
    /// SVD returns a single URL; some versions return a list of frames' files,
    /// in which case the first entry is the video.
    pub fn video_url(&self) -> Option<String> {
        match self.output.as_ref()? {
            Value::String(url) => Some(url.clone()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }
}

/// Map a 0..=1 motion strength onto SVD's 0..=255 motion bucket
pub fn motion_bucket_id(motion_strength: f64) -> u32 {
    (motion_strength.clamp(0.0, 1.0) * 255.0).round() as u32
}

#[derive(Clone, Debug)]
pub struct ReplicateClient {
    http: Client,
    api_token: Option<String>,
    base_url: String,
    svd_version: String,
}

impl ReplicateClient {
    pub fn new(http: Client, settings: &ReplicateSettings) -> Self {
        Self {
            http,
            api_token: settings.api_token.clone(),
            base_url: settings.base_url.clone(),
            svd_version: settings.svd_version.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }

    pub async fn create_prediction(&self, input: SvdInput<'_>) -> Result<Prediction, ProviderError> {
        let token = require(PROVIDER, "REPLICATE_API_TOKEN", self.api_token.as_ref())?;
        let url = endpoint(PROVIDER, &self.base_url, &["v1", "predictions"])?;
        tracing::debug!("POST {} version={}", url, self.svd_version);

        let body = CreatePrediction {
            version: &self.svd_version,
            input,
        };
        send_json(PROVIDER, self.http.post(url).bearer_auth(token).json(&body)).await
    }

    pub async fn get_prediction(&self, prediction_id: &str) -> Result<Prediction, ProviderError> {
        let token = require(PROVIDER, "REPLICATE_API_TOKEN", self.api_token.as_ref())?;
        let url = endpoint(PROVIDER, &self.base_url, &["v1", "predictions", prediction_id])?;
        tracing::debug!("GET {}", url);

        send_json(PROVIDER, self.http.get(url).bearer_auth(token)).await
    }
}
