use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Render the admin metrics page for a visit count.
pub fn render_metrics(visits: i64) -> String {
    format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>",
        visits
    )
}

pub async fn get_metrics(State(state): State<AppState>) -> Html<String> {
    Html(render_metrics(state.visits.snapshot()))
}

/// Purge users and zero the visit counter. Dev mode only.
///
/// The counter is only reset once the purge has succeeded.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if !state.platform.is_dev() {
        tracing::warn!(platform = %state.platform, "Reset refused outside dev mode");
        return Err(ApiError::Forbidden("Reset is only allowed in dev environment"));
    }

    state
        .store
        .delete_all_users()
        .await
        .map_err(ApiError::storage("deleting users"))?;
    state.visits.reset();

    tracing::info!("Users deleted and visit counter reset");
    Ok(StatusCode::OK)
}
