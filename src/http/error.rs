//! Handler error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::http::response::respond_with_error;
use crate::moderation::TooLong;
use crate::storage::StorageError;

/// Errors a handler can return. Each maps to one status code and is rendered
/// through [`respond_with_error`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body over the length bound.
    #[error("Chirp is too long")]
    ChirpTooLong(#[from] TooLong),

    /// Privileged operation outside dev mode.
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("error while finding a chirp: no chirp with id {0}")]
    ChirpNotFound(Uuid),

    /// The request body could not be read.
    #[error("couldn't read request!")]
    UnreadableBody { status: StatusCode, detail: String },

    /// The request body was not the expected JSON.
    #[error("couldn't unmarshal parameters")]
    MalformedRequest { detail: String },

    /// A path identifier that is not a UUID.
    #[error("invalid uuid: {0}")]
    MalformedId(#[from] uuid::Error),

    #[error("error while {action}: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: StorageError,
    },
}

impl ApiError {
    /// Adapter for `map_err` on storage calls.
    pub fn storage(action: &'static str) -> impl FnOnce(StorageError) -> ApiError {
        move |source| ApiError::Storage { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ChirpTooLong(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ChirpNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnreadableBody { status, .. } => *status,
            // Malformed input is reported as a server error; clients of the
            // existing API depend on it.
            ApiError::MalformedRequest { .. } | ApiError::MalformedId(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Storage { action, source } => {
                tracing::error!(action = %action, error = %source, "Storage call failed");
            }
            ApiError::UnreadableBody { detail, .. } | ApiError::MalformedRequest { detail } => {
                tracing::warn!(status = %status, detail = %detail, "Rejected request body");
            }
            other => {
                tracing::debug!(status = %status, error = %other, "Request rejected");
            }
        }
        respond_with_error(status, self.to_string())
    }
}
