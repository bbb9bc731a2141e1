//! Shared HTTP plumbing for provider clients
//!
//! Every provider call goes through [`send_json`] or [`send_bytes`], which
//! classify failures into [`ProviderError`] so handlers can tell a provider
//! that could not be reached from one that answered with an error.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure talking to an external provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection refused, DNS failure, timeout and the like
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success status
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    /// A credential or endpoint required for the call is unset
    #[error("{provider} is not configured: {setting} is not set")]
    NotConfigured {
        provider: &'static str,
        setting: &'static str,
    },

    /// Configured base URL cannot carry a path
    #[error("{provider} base URL is invalid: {message}")]
    InvalidEndpoint {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// True when the provider was never reached
    ///
    /// Unset endpoints count as unreachable; an HTTP error status does not.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::NotConfigured { .. })
    }

    /// Upstream response text, when the provider sent one
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Binary provider response (generated image or audio)
#[derive(Debug, Clone)]
pub struct BinaryPayload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// True for identifiers that are safe to place in a provider URL path
///
/// Provider ids (Replicate predictions, ElevenLabs voices) are ASCII
/// alphanumerics, `_` and `-`.
pub fn is_path_safe_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Append `segments` to `base_url`, each encoded as exactly one path segment
pub fn endpoint(provider: &'static str, base_url: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base_url).map_err(|e| ProviderError::InvalidEndpoint {
        provider,
        message: e.to_string(),
    })?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::InvalidEndpoint {
            provider,
            message: format!("{} cannot be a base", base_url),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Build the pooled client shared by every provider
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("alungu-ai/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Send a request and decode a JSON response body
pub async fn send_json<T>(provider: &'static str, request: RequestBuilder) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let response = dispatch(provider, request).await?;
    let body = response
        .bytes()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    serde_json::from_slice(&body).map_err(|e| ProviderError::Decode {
        provider,
        message: e.to_string(),
    })
}

/// Send a request and keep the raw response body
pub async fn send_bytes(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<BinaryPayload, ProviderError> {
    let response = dispatch(provider, request).await?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    debug!("{} returned {} bytes", provider, bytes.len());
    Ok(BinaryPayload {
        bytes,
        content_type,
    })
}

async fn dispatch(provider: &'static str, request: RequestBuilder) -> Result<Response, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("{} returned HTTP {}", provider, status);
    Err(ProviderError::Status {
        provider,
        status: status.as_u16(),
        body,
    })
}

/// Require an optional setting, naming it in the error
pub fn require<'a>(
    provider: &'static str,
    setting: &'static str,
    value: Option<&'a String>,
) -> Result<&'a str, ProviderError> {
    value
        .map(String::as_str)
        .ok_or(ProviderError::NotConfigured { provider, setting })
}
