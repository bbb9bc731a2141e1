//! Uniform response envelope for generation endpoints
//!
//! Every generation answers `{success, <artifact>_url, generation_id,
//! metadata}`; `metadata` always carries the validated `settings`,
//! `generated_at`, `user_id` and `provider`.

use axum::response::{IntoResponse, Json, Response};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::providers::ProviderError;

/// Current time as an RFC 3339 UTC timestamp with millisecond precision
pub fn generated_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `<prefix>_<unix millis>`, used for locally minted ids
pub fn millis_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_millis())
}

/// Inline binary content as a `data:` URL
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read one field of a provider JSON result, `null` when absent
pub fn pick(result: &Value, key: &str) -> Value {
    result.get(key).cloned().unwrap_or(Value::Null)
}

/// Log a provider failure and replace it with the endpoint's generic message
pub fn upstream_failure(err: ProviderError, message: &str) -> BackendError {
    tracing::error!("{}: {}", message, err);
    BackendError::upstream(message)
}

/// `metadata` object of a generation response
#[derive(Debug, Clone)]
pub struct Metadata {
    fields: Map<String, Value>,
}

impl Metadata {
    /// Start metadata with the fields every endpoint reports
    pub fn new<S>(settings: &S, user: &AuthenticatedUser, provider: &str) -> Result<Self, BackendError>
    where
        S: Serialize,
    {
        let mut fields = Map::new();
        fields.insert("settings".to_string(), serde_json::to_value(settings)?);
        fields.insert("generated_at".to_string(), Value::String(generated_at()));
        fields.insert("user_id".to_string(), Value::String(user.user_id.to_string()));
        fields.insert("provider".to_string(), Value::String(provider.to_string()));
        Ok(Self { fields })
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// Successful generation response
#[derive(Debug, Clone)]
pub struct Envelope {
    body: Map<String, Value>,
}

impl Envelope {
    pub fn new() -> Self {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(true));
        Self { body }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_string(), value.into());
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.body
            .insert("metadata".to_string(), Value::Object(metadata.fields));
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json(self.into_value()).into_response()
    }
}
