//! Response shaping.
//!
//! # Responsibilities
//! - Serialize JSON payloads with the shared header set
//! - Wrap error messages in the `{"error": ...}` envelope
//!
//! # Design Decisions
//! - Every JSON response carries `Access-Control-Allow-Origin: *`
//! - The payload is fully serialized before the response is built, so a
//!   serialization failure becomes a clean 500 instead of a partial body

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Serialize `payload` as the response body with the given status.
pub fn respond_with_json<T>(status: StatusCode, payload: &T) -> Response
where
    T: Serialize + ?Sized,
{
    let body = match serde_json::to_vec(payload) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response payload");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        status,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Body::from(body),
    )
        .into_response()
}

/// Respond with `{"error": message}`.
pub fn respond_with_error(status: StatusCode, message: impl Into<String>) -> Response {
    respond_with_json(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}
