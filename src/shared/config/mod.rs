//! Application configuration module
//!
//! Environment variables are the only configuration surface. [`AppConfig::from_env`]
//! reads them once at startup; [`AppConfig::from_lookup`] accepts any key lookup
//! so tests can configure the server without touching the process environment.
//!
//! Empty values are treated as unset, so `FOO=` disables a provider the same
//! way as leaving `FOO` out.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "alungu-dev-secret-change-in-production";

pub const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api";
pub const DEFAULT_OPENROUTER_MODEL: &str = "meta-llama/llama-3.1-8b-instruct:free";
pub const DEFAULT_REPLICATE_BASE_URL: &str = "https://api.replicate.com";
/// stability-ai/stable-video-diffusion
pub const DEFAULT_REPLICATE_SVD_VERSION: &str =
    "3f0457e4619daac51203dedb472816fd4af51f3149fa7a9e0b5ffcf1b8172438";
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_ELEVENLABS_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_ELEVENLABS_MODEL_ID: &str = "eleven_multilingual_v2";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

macro_rules! provider_choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(
                        "unknown provider {:?}, expected one of: {}",
                        other,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

provider_choice!(
    /// Backend for `POST /api/chat`
    ChatProvider { Ollama => "ollama", OpenRouter => "openrouter" }
);
provider_choice!(
    /// Backend for `POST /api/generate/image`
    ImageProvider { HuggingFace => "huggingface", Colab => "colab" }
);
provider_choice!(
    /// Backend for `POST /api/generate/video`
    VideoProvider { Colab => "colab", Replicate => "replicate" }
);
provider_choice!(
    /// Backend for `POST /api/generate/audio`
    AudioProvider { Colab => "colab", ElevenLabs => "elevenlabs" }
);

/// Which provider serves each feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderSelection {
    pub chat: ChatProvider,
    pub image: ImageProvider,
    pub video: VideoProvider,
    pub audio: AudioProvider,
}

impl Default for ProviderSelection {
    fn default() -> Self {
        Self {
            chat: ChatProvider::Ollama,
            image: ImageProvider::HuggingFace,
            video: VideoProvider::Colab,
            audio: AudioProvider::Colab,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuggingFaceSettings {
    pub api_token: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ReplicateSettings {
    pub api_token: Option<String>,
    pub base_url: String,
    pub svd_version: String,
}

#[derive(Debug, Clone)]
pub struct ElevenLabsSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub voice_id: String,
    pub model_id: String,
}

#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ColabSettings {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    pub server_port: u16,
    /// PostgreSQL URL; `None` selects the in-memory user store
    pub database_url: Option<String>,
    /// HS256 key for session tokens
    pub jwt_secret: String,
    /// Minimum accepted password length at registration
    pub min_password_length: usize,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Timeout applied to every outbound provider request
    pub provider_timeout: Duration,
    pub providers: ProviderSelection,
    pub huggingface: HuggingFaceSettings,
    pub openrouter: OpenRouterSettings,
    pub replicate: ReplicateSettings,
    pub elevenlabs: ElevenLabsSettings,
    pub ollama: OllamaSettings,
    pub colab: ColabSettings,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` when a numeric setting does not
    /// parse, a provider name is unknown, or the bcrypt cost is out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = match get("JWT_SECRET").or_else(|| get("NEXTAUTH_SECRET")) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set, using the development signing key");
                DEV_JWT_SECRET.to_string()
            }
        };

        let bcrypt_cost: u32 = parse_or(&get, "BCRYPT_COST", 12)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                &bcrypt_cost.to_string(),
                "must be between 4 and 31",
            ));
        }

        let providers = ProviderSelection {
            chat: parse_or(&get, "CHAT_PROVIDER", ChatProvider::Ollama)?,
            image: parse_or(&get, "IMAGE_PROVIDER", ImageProvider::HuggingFace)?,
            video: parse_or(&get, "VIDEO_PROVIDER", VideoProvider::Colab)?,
            audio: parse_or(&get, "AUDIO_PROVIDER", AudioProvider::Colab)?,
        };

        Ok(Self {
            server_port: parse_or(&get, "SERVER_PORT", 3000)?,
            database_url: get("DATABASE_URL"),
            jwt_secret,
            min_password_length: parse_or(&get, "MIN_PASSWORD_LENGTH", 6)?,
            bcrypt_cost,
            provider_timeout: Duration::from_secs(parse_or(&get, "PROVIDER_TIMEOUT_SECS", 120)?),
            providers,
            huggingface: HuggingFaceSettings {
                api_token: get("HUGGINGFACE_API_TOKEN"),
                base_url: base_url(get("HUGGINGFACE_BASE_URL"), DEFAULT_HUGGINGFACE_BASE_URL),
            },
            openrouter: OpenRouterSettings {
                api_key: get("OPENROUTER_API_KEY"),
                base_url: base_url(get("OPENROUTER_BASE_URL"), DEFAULT_OPENROUTER_BASE_URL),
                model: get("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
            },
            replicate: ReplicateSettings {
                api_token: get("REPLICATE_API_TOKEN"),
                base_url: base_url(get("REPLICATE_BASE_URL"), DEFAULT_REPLICATE_BASE_URL),
                svd_version: get("REPLICATE_SVD_VERSION")
                    .unwrap_or_else(|| DEFAULT_REPLICATE_SVD_VERSION.to_string()),
            },
            elevenlabs: ElevenLabsSettings {
                api_key: get("ELEVENLABS_API_KEY"),
                base_url: base_url(get("ELEVENLABS_BASE_URL"), DEFAULT_ELEVENLABS_BASE_URL),
                voice_id: get("ELEVENLABS_VOICE_ID")
                    .unwrap_or_else(|| DEFAULT_ELEVENLABS_VOICE_ID.to_string()),
                model_id: get("ELEVENLABS_MODEL_ID")
                    .unwrap_or_else(|| DEFAULT_ELEVENLABS_MODEL_ID.to_string()),
            },
            ollama: OllamaSettings {
                endpoint: get("OLLAMA_ENDPOINT").map(trim_slash),
            },
            colab: ColabSettings {
                base_url: get("COLAB_API_BASE_URL").map(trim_slash),
                api_token: get("COLAB_API_TOKEN"),
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid(key, &raw, e)),
        None => Ok(default),
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    trim_slash(value.unwrap_or_else(|| default.to_string()))
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
