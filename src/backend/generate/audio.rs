/**
 * Audio Generation
 *
 * `POST /api/generate/audio`: speech (Bark) or music (MusicGen) on the Colab
 * tunnel, or speech only through ElevenLabs.
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
use crate::backend::providers::client::is_path_safe_id;
use crate::backend::providers::colab::routes;
use crate::backend::providers::elevenlabs::{SpeechRequest, VoiceSettings};
use crate::backend::server::state::AppState;
use crate::shared::config::AudioProvider;
use crate::shared::{FieldViolation, SharedError, Validate, Validator};

const FAILURE: &str = "Failed to generate audio";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioKind {
    #[default]
    Tts,
    Music,
}

impl AudioKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tts => "tts",
            Self::Music => "music",
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_speed() -> f64 {
    1.0
}

fn default_duration() -> u32 {
    30
}

/// Audio request body with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioRequest {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: AudioKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Base64 audio for voice cloning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_sample: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Seconds of music
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u32>,
}

impl Validate for AudioRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let mut v = Validator::new();
        v.required("text", &self.text, "Text is required")
            .range("speed", self.speed, 0.5, 2.0)
            .range("duration", self.duration, 5, 120)
            .range_opt("bpm", self.bpm, 60, 200);
        v.finish()
    }
}

/// Audio generation handler
pub async fn generate_audio(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<AudioRequest>,
) -> Result<Envelope, BackendError> {
    request.validate()?;

    let provider = state.providers.selection.audio;
    tracing::info!(
        "Audio generation ({}) via {} for user {}",
        request.kind.as_str(),
        provider,
        user.user_id
    );

    let (audio_url, generation_id) = match provider {
        AudioProvider::Colab => {
            let route = match request.kind {
                AudioKind::Tts => routes::BARK,
                AudioKind::Music => routes::MUSICGEN,
            };
            let result = state
                .providers
                .colab
                .post(
                    route,
                    &json!({
                        "text": request.text,
                        "voice": request.voice,
                        "voice_sample": request.voice_sample,
                        "language": request.language,
                        "speed": request.speed,
                        "genre": request.genre,
                        "duration": request.duration,
                        "bpm": request.bpm,
                    }),
                )
                .await
                .map_err(|err| upstream_failure(err, FAILURE))?;
            (pick(&result, "audio_url"), pick(&result, "id"))
        }
        AudioProvider::ElevenLabs => {
            if request.kind == AudioKind::Music {
                return Err(BackendError::invalid_input(
                    "Invalid input",
                    vec![FieldViolation::new(
                        "type",
                        "music generation is not available with the elevenlabs provider",
                    )],
                ));
            }

            let mut v = Validator::new();
            v.check(
                request.voice.as_deref().map_or(true, |voice| voice.is_empty() || is_path_safe_id(voice)),
                "voice",
                "voice must be an ElevenLabs voice id",
            );
            v.finish()?;

            let elevenlabs = &state.providers.elevenlabs;
            if !elevenlabs.is_configured() {
                return Err(BackendError::handler(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ElevenLabs API key not configured",
                ));
            }

            let voice_id = request
                .voice
                .as_deref()
                .filter(|voice| !voice.is_empty())
                .unwrap_or_else(|| elevenlabs.default_voice());
            let payload = elevenlabs
                .text_to_speech(
                    voice_id,
                    &SpeechRequest {
                        text: &request.text,
                        model_id: elevenlabs.model_id(),
                        voice_settings: VoiceSettings::with_speed(request.speed),
                    },
                )
                .await
                .map_err(|err| upstream_failure(err, FAILURE))?;
            (
                data_uri("audio/mpeg", &payload.bytes).into(),
                millis_id("el").into(),
            )
        }
    };

    let metadata = Metadata::new(&request, &user, provider.as_str())?
        .with("text", request.text.clone())
        .with("type", request.kind.as_str());
    Ok(Envelope::new()
        .field("audio_url", audio_url)
        .field("generation_id", generation_id)
        .metadata(metadata))
}
