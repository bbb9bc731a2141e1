/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers. The error is converted to its status code
 * and a JSON body.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Invalid input",
 *   "status": 400,
 *   "details": [{ "field": "prompt", "message": "Prompt is required" }]
 * }
 * ```
 *
 * `details` is omitted when the error carries none.
 */

use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        }

        let mut body = json!({
            "error": message,
            "status": status.as_u16(),
        });
        if let Some(details) = self.details() {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}
