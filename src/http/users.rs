//! User registration endpoint.

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::request::JsonBody;
use crate::http::response::respond_with_json;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .store
        .create_user(&request.email)
        .await
        .map_err(ApiError::storage("creating a user"))?;

    tracing::info!(user_id = %user.id, "User created");
    Ok(respond_with_json(StatusCode::CREATED, &user))
}
