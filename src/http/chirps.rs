//! Chirp endpoints.
//!
//! Two creation contracts exist side by side:
//! - `POST /api/validate_chirp` checks and masks the body, persists nothing
//! - `POST /api/chirps` checks the body and stores it unmasked

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::request::JsonBody;
use crate::http::response::respond_with_json;
use crate::http::server::AppState;
use crate::moderation;
use crate::storage::NewChirp;

#[derive(Debug, Deserialize)]
pub struct ChirpRequest {
    pub body: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CleanedChirp {
    pub cleaned_body: String,
}

/// Moderation check without persistence.
pub async fn validate_chirp(
    JsonBody(request): JsonBody<ChirpRequest>,
) -> Result<Response, ApiError> {
    let body = moderation::validate(&request.body)?;
    let cleaned = CleanedChirp {
        cleaned_body: body.cleaned(),
    };
    Ok(respond_with_json(StatusCode::OK, &cleaned))
}

/// Validate and store the raw body.
pub async fn create_chirp(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ChirpRequest>,
) -> Result<Response, ApiError> {
    moderation::validate(&request.body)?;

    let chirp = state
        .store
        .create_chirp(NewChirp {
            body: request.body,
            user_id: request.user_id,
        })
        .await
        .map_err(ApiError::storage("creating a chirp"))?;

    tracing::info!(chirp_id = %chirp.id, user_id = ?chirp.user_id, "Chirp created");
    Ok(respond_with_json(StatusCode::CREATED, &chirp))
}

pub async fn list_chirps(State(state): State<AppState>) -> Result<Response, ApiError> {
    let chirps = state
        .store
        .list_chirps()
        .await
        .map_err(ApiError::storage("listing chirps"))?;
    Ok(respond_with_json(StatusCode::OK, &chirps))
}

/// The id is taken as a raw string so a malformed value surfaces as
/// [`ApiError::MalformedId`] rather than the router's own rejection.
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = Uuid::parse_str(&chirp_id)?;

    let chirp = state
        .store
        .get_chirp(id)
        .await
        .map_err(ApiError::storage("finding a chirp"))?
        .ok_or(ApiError::ChirpNotFound(id))?;
    Ok(respond_with_json(StatusCode::OK, &chirp))
}
