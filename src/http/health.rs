//! Liveness endpoint.

use axum::{http::header, response::IntoResponse};

/// Liveness probe.
pub async fn healthz() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "OK")
}
