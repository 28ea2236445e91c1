//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter
//! - Construct the storage collaborator and HTTP server
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: a bind error is fatal
//! - Metrics exporter failure is logged, the API still starts

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::storage::{ChirpStore, MemoryStore};

/// Run the service with the in-memory store until a shutdown signal.
pub async fn run(config: ServiceConfig) -> Result<(), std::io::Error> {
    let store: Arc<dyn ChirpStore> = Arc::new(MemoryStore::new());
    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();
    serve(config, store, &shutdown).await
}

/// Bind and serve `store` until `shutdown` fires.
pub async fn serve(
    config: ServiceConfig,
    store: Arc<dyn ChirpStore>,
    shutdown: &Shutdown,
) -> Result<(), std::io::Error> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await
}
