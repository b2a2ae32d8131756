/**
 * Error Conversion
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "message too long, max 2000 characters",
 *   "status": 422
 * }
 * ```
 */

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), %message, "request rejected");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        let mut response = Response::new(Body::from(body.to_string()));
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        response
    }
}

/// Status and JSON body for an error, for callers outside an axum handler
pub fn error_body(error: &BackendError) -> (StatusCode, serde_json::Value) {
    let status = error.status_code();
    (
        status,
        serde_json::json!({
            "error": error.message(),
            "status": status.as_u16(),
        }),
    )
}
