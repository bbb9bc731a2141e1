/**
 * JSON Body Extraction
 *
 * Axum's `Json` extractor answers malformed bodies with a plain-text
 * rejection. `JsonBody` wraps it so that unreadable or mistyped payloads are
 * reported like any other schema failure: a 400 with a `body` violation.
 */

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;
use crate::shared::FieldViolation;

/// JSON request body with structured rejections
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> BackendError {
    let detail = rejection.body_text();
    tracing::warn!("Rejected request body: {}", detail);
    BackendError::invalid_input("Invalid input", vec![FieldViolation::new("body", detail)])
}
