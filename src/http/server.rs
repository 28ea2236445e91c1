//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, metrics, timeout, body limit)
//! - Mount static assets under `/app` behind the visit counter
//! - Bind server to listener and shut down gracefully

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::{Platform, ServiceConfig};
use crate::http::middleware::{count_visits, track_requests, VisitCounter};
use crate::http::{chirps, health, request, users};
use crate::storage::ChirpStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChirpStore>,
    pub visits: Arc<VisitCounter>,
    pub platform: Platform,
}

impl AppState {
    pub fn new(store: Arc<dyn ChirpStore>, platform: Platform) -> Self {
        Self {
            store,
            visits: Arc::new(VisitCounter::new()),
            platform,
        }
    }
}

/// HTTP server for the chirpy API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server backed by `store`.
    pub fn new(config: ServiceConfig, store: Arc<dyn ChirpStore>) -> Self {
        let state = AppState::new(store, config.server.platform);
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let assets = Router::new()
            .nest_service("/app", ServeDir::new(&config.server.static_root))
            .route_layer(middleware::from_fn_with_state(
                state.visits.clone(),
                count_visits,
            ));

        Router::new()
            .route("/api/healthz", get(health::healthz))
            .route("/api/users", post(users::create_user))
            .route("/api/validate_chirp", post(chirps::validate_chirp))
            .route(
                "/api/chirps",
                get(chirps::list_chirps).post(chirps::create_chirp),
            )
            .route("/api/chirps/{chirp_id}", get(chirps::get_chirp))
            .merge(setup_admin_router())
            .with_state(state)
            .merge(assets)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(track_requests))
            .layer(request::propagate_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
            .layer(request::set_request_id())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared state; exposes the visit counter and store.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            platform = %self.state.platform,
            static_root = %self.config.server.static_root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Chirp, MemoryStore, NewChirp, StorageError, StorageResult, User};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    /// A store whose every call fails.
    struct BrokenStore;

    #[async_trait]
    impl ChirpStore for BrokenStore {
        async fn create_user(&self, _email: &str) -> StorageResult<User> {
            Err(StorageError::Unavailable("connection refused".into()))
        }
        async fn create_chirp(&self, _chirp: NewChirp) -> StorageResult<Chirp> {
            Err(StorageError::Unavailable("connection refused".into()))
        }
        async fn list_chirps(&self) -> StorageResult<Vec<Chirp>> {
            Err(StorageError::Unavailable("connection refused".into()))
        }
        async fn get_chirp(&self, _id: Uuid) -> StorageResult<Option<Chirp>> {
            Err(StorageError::Unavailable("connection refused".into()))
        }
        async fn delete_all_users(&self) -> StorageResult<()> {
            Err(StorageError::Unavailable("connection refused".into()))
        }
    }

    fn server(platform: Platform) -> HttpServer {
        let mut config = ServiceConfig::default();
        config.server.platform = platform;
        HttpServer::new(config, Arc::new(MemoryStore::new()))
    }

    fn broken_server(platform: Platform) -> HttpServer {
        let mut config = ServiceConfig::default();
        config.server.platform = platform;
        HttpServer::new(config, Arc::new(BrokenStore))
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn read_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = send(server(Platform::Other).router(), "GET", "/api/healthz", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert!(response.headers().contains_key(request::X_REQUEST_ID));
        assert_eq!(read_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_validate_chirp_masks_without_storing() {
        let srv = server(Platform::Other);
        let response = send(
            srv.router(),
            "POST",
            "/api/validate_chirp",
            Some(json!({"body": "I had a KERFUFFLE with the sharbert!"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"cleaned_body": "I had a **** with the sharbert!"})
        );

        let stored = srv.state().store.list_chirps().await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_create_chirp_stores_raw_body() {
        let srv = server(Platform::Other);
        let response = send(
            srv.router(),
            "POST",
            "/api/chirps",
            Some(json!({"body": "fornax everywhere"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let chirp = read_json(response).await;
        assert_eq!(chirp["body"], "fornax everywhere");
        assert!(chirp["user_id"].is_null());
    }

    #[tokio::test]
    async fn test_length_boundary() {
        let srv = server(Platform::Other);

        let exact = "x".repeat(140);
        let response = send(srv.router(), "POST", "/api/chirps", Some(json!({"body": exact}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let over = "x".repeat(141);
        let response = send(srv.router(), "POST", "/api/chirps", Some(json!({"body": over}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await, json!({"error": "Chirp is too long"}));

        let response = send(
            srv.router(),
            "POST",
            "/api/validate_chirp",
            Some(json!({"body": "y".repeat(141)})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(srv.state().store.list_chirps().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_too_long_never_reaches_storage() {
        // A broken store would turn any storage call into a 500.
        let srv = broken_server(Platform::Other);
        let response = send(
            srv.router(),
            "POST",
            "/api/chirps",
            Some(json!({"body": "z".repeat(200)})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_500() {
        let srv = server(Platform::Other);
        let request = Request::builder()
            .method("POST")
            .uri("/api/users")
            .body(Body::from("{\"email\": "))
            .unwrap();
        let response = srv.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({"error": "couldn't unmarshal parameters"})
        );
    }

    #[tokio::test]
    async fn test_create_user_and_duplicate() {
        let srv = server(Platform::Other);
        let response = send(
            srv.router(),
            "POST",
            "/api/users",
            Some(json!({"email": "walt@breakingbad.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let user = read_json(response).await;
        assert_eq!(user["email"], "walt@breakingbad.com");
        assert!(user["id"].is_string());
        assert!(user["created_at"].is_string());

        let response = send(
            srv.router(),
            "POST",
            "/api/users",
            Some(json!({"email": "walt@breakingbad.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_chirp_for_unknown_user_is_500() {
        let srv = server(Platform::Other);
        let response = send(
            srv.router(),
            "POST",
            "/api/chirps",
            Some(json!({"body": "hi", "user_id": Uuid::new_v4()})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_get_chirp_lookup() {
        let srv = server(Platform::Other);
        let created = send(srv.router(), "POST", "/api/chirps", Some(json!({"body": "hello"}))).await;
        let created = read_json(created).await;
        let id = created["id"].as_str().unwrap();

        let response = send(srv.router(), "GET", &format!("/api/chirps/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, created);

        let missing = Uuid::new_v4();
        let response = send(srv.router(), "GET", &format!("/api/chirps/{}", missing), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(srv.router(), "GET", "/api/chirps/not-a-uuid", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("invalid uuid"));
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let srv = broken_server(Platform::Other);
        let response = send(srv.router(), "GET", "/api/chirps", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(
            body["error"],
            "error while listing chirps: storage unavailable: connection refused"
        );
    }

    #[tokio::test]
    async fn test_metrics_page_reports_visits() {
        let srv = server(Platform::Other);
        srv.state().visits.increment();
        srv.state().visits.increment();

        let response = send(srv.router(), "GET", "/admin/metrics", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(read_text(response)
            .await
            .contains("Chirpy has been visited 2 times!"));
    }

    #[tokio::test]
    async fn test_reset_forbidden_outside_dev() {
        let srv = server(Platform::Other);
        let user = srv.state().store.create_user("keep@example.com").await.unwrap();
        srv.state().visits.increment();

        let response = send(srv.router(), "POST", "/admin/reset", None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(srv.state().visits.snapshot(), 1);

        // The user survived: a chirp can still reference it.
        let response = send(
            srv.router(),
            "POST",
            "/api/chirps",
            Some(json!({"body": "still here", "user_id": user.id})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_reset_in_dev_purges() {
        let srv = server(Platform::Dev);
        let user = srv.state().store.create_user("gone@example.com").await.unwrap();
        srv.state()
            .store
            .create_chirp(NewChirp {
                body: "owned".into(),
                user_id: Some(user.id),
            })
            .await
            .unwrap();
        srv.state().visits.increment();

        let response = send(srv.router(), "POST", "/admin/reset", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(srv.state().visits.snapshot(), 0);
        assert!(srv.state().store.list_chirps().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_storage_failure_keeps_counter() {
        let srv = broken_server(Platform::Dev);
        srv.state().visits.increment();

        let response = send(srv.router(), "POST", "/admin/reset", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(srv.state().visits.snapshot(), 1);
    }

    #[tokio::test]
    async fn test_static_assets_count_visits() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Chirpy</h1>").unwrap();

        let mut config = ServiceConfig::default();
        config.server.static_root = dir.path().to_string_lossy().into_owned();
        let srv = HttpServer::new(config, Arc::new(MemoryStore::new()));

        let response = send(srv.router(), "GET", "/app/index.html", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "<h1>Chirpy</h1>");

        let response = send(srv.router(), "GET", "/app/missing.png", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // API routes and unmatched paths do not count.
        send(srv.router(), "GET", "/api/healthz", None).await;
        let response = send(srv.router(), "GET", "/nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = send(srv.router(), "GET", "/api/unknown", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert_eq!(srv.state().visits.snapshot(), 2);
    }

    #[tokio::test]
    async fn test_unmatched_paths_leave_visits_alone() {
        let srv = server(Platform::Other);
        for uri in ["/nope", "/api/unknown", "/apps/index.html"] {
            let response = send(srv.router(), "GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
        assert_eq!(srv.state().visits.snapshot(), 0);
    }
}
