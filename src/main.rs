//! Chirpy API server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                     CHIRPY                        │
//!   Client Request    │  ┌──────────┐    ┌──────────┐    ┌────────────┐  │
//!   ──────────────────┼─▶│ request  │───▶│  router  │───▶│  handlers  │  │
//!                     │  │ id/trace │    │          │    │            │  │
//!                     │  └──────────┘    └────┬─────┘    └─────┬──────┘  │
//!                     │                       │ /app/*         │         │
//!                     │                       ▼                ▼         │
//!                     │                 ┌──────────┐    ┌────────────┐  │
//!                     │                 │  visit   │    │ moderation │  │
//!                     │                 │ counter  │    │ validate/  │  │
//!                     │                 └────┬─────┘    │   clean    │  │
//!                     │                      ▼          └─────┬──────┘  │
//!                     │                 ┌──────────┐          ▼         │
//!                     │                 │ ServeDir │    ┌────────────┐  │
//!                     │                 └──────────┘    │  storage   │  │
//!                     │                                 └────────────┘  │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use chirpy::config::load_config;
use chirpy::lifecycle::startup;
use chirpy::observability::logging;

#[derive(Parser)]
#[command(name = "chirpy")]
#[command(about = "Chirpy API server", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "CHIRPY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside development.
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("chirpy v{} starting", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        platform = %config.server.platform,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
