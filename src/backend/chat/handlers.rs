/**
 * Chat Handler
 *
 * `POST /api/chat` answers one message through the configured chat provider.
 *
 * # Ollama fallback
 *
 * With the Ollama provider the local endpoint is tried first. When it cannot
 * be reached (unset, connection refused, timed out) the request is replayed
 * exactly once against the Colab Ollama proxy. An HTTP error from the local
 * endpoint is final and does not trigger the fallback.
 */

use axum::{extract::State, response::Json};
use serde_json::json;

use crate::backend::chat::types::{ChatMetadata, ChatRequest, ChatResponse, DEFAULT_OLLAMA_MODEL};
use crate::backend::error::BackendError;
use crate::backend::extract::JsonBody;
use crate::backend::generate::envelope::{generated_at, millis_id};
use crate::backend::middleware::AuthUser;
use crate::backend::providers::colab::routes;
use crate::backend::providers::ollama::{GenerateOptions, GenerateReply, GenerateRequest};
use crate::backend::providers::openrouter::{ChatMessage, CompletionRequest};
use crate::backend::providers::{Providers, ProviderError};
use crate::backend::server::state::AppState;
use crate::shared::config::ChatProvider;
use crate::shared::Validate;

const FAILURE: &str = "Failed to process chat message";

/// Chat handler
///
/// # Errors
///
/// * `400` - empty message or out-of-range settings
/// * `500` - every provider attempt failed
pub async fn chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, BackendError> {
    request.validate()?;

    let providers = &state.providers;
    let (model, provider, message) = match providers.selection.chat {
        ChatProvider::Ollama => {
            let model = request.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL);
            let (provider, message) = ollama_with_fallback(providers, &request, model).await?;
            (model.to_string(), provider, message)
        }
        ChatProvider::OpenRouter => {
            let model = request
                .model
                .as_deref()
                .unwrap_or_else(|| providers.openrouter.default_model());
            let message = openrouter(providers, &request, model).await?;
            (model.to_string(), ChatProvider::OpenRouter.as_str(), message)
        }
    };

    tracing::info!("Chat reply from {} ({}) for user {}", provider, model, user.user_id);

    Ok(Json(ChatResponse {
        success: true,
        message,
        conversation_id: request
            .conversation_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| millis_id("conv")),
        metadata: ChatMetadata {
            model,
            provider: provider.to_string(),
            generated_at: generated_at(),
            user_id: user.user_id,
        },
    }))
}

async fn ollama_with_fallback(
    providers: &Providers,
    request: &ChatRequest,
    model: &str,
) -> Result<(&'static str, String), BackendError> {
    let primary = providers
        .ollama
        .generate(&GenerateRequest {
            model,
            prompt: &request.message,
            system: request.system_prompt.as_deref(),
            options: GenerateOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
            stream: false,
        })
        .await;

    match primary {
        Ok(reply) => Ok(("ollama", reply.into_text())),
        Err(err) if err.is_unreachable() => {
            tracing::warn!("Ollama unreachable, falling back to Colab: {}", err);
            let result = providers
                .colab
                .post(
                    routes::OLLAMA_CHAT,
                    &json!({
                        "message": request.message,
                        "model": model,
                        "temperature": request.temperature,
                        "max_tokens": request.max_tokens,
                        "system_prompt": request.system_prompt,
                    }),
                )
                .await
                .map_err(chat_failure)?;

            let reply: GenerateReply = serde_json::from_value(result).map_err(|e| {
                chat_failure(ProviderError::Decode {
                    provider: "colab",
                    message: e.to_string(),
                })
            })?;
            Ok(("colab", reply.into_text()))
        }
        Err(err) => Err(chat_failure(err)),
    }
}

async fn openrouter(
    providers: &Providers,
    request: &ChatRequest,
    model: &str,
) -> Result<String, BackendError> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system_prompt.as_deref().filter(|s| !s.is_empty()) {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(request.message.clone()));

    providers
        .openrouter
        .complete(&CompletionRequest {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        })
        .await
        .map_err(chat_failure)
}

fn chat_failure(err: ProviderError) -> BackendError {
    tracing::error!("Chat error: {}", err);
    BackendError::upstream(FAILURE)
}
