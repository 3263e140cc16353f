//! Transit Lab HTTP server.
//!
//! ```bash
//! # In-memory catalog, no classifier
//! cargo run --bin transit-server
//!
//! # Persistent catalog and an upstream classifier
//! REPOSITORY_TYPE=file PREDICTOR_URL=http://localhost:8000 \
//!   cargo run --bin transit-server
//! ```
//!
//! Settings are read from `transit-lab.toml` and environment overrides (see
//! `transit_lab::config`). `RUST_LOG` sets the log filter (default: info).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_lab::config::AppConfig;
use transit_lab::db::RepositoryFactory;
use transit_lab::http::{create_router, AppState};
use transit_lab::services::prediction::{HttpPredictor, Predictor, UnconfiguredPredictor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Transit Lab HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;

    let repository = RepositoryFactory::create(&config.catalog)
        .await
        .context("Failed to initialize model catalog")?;
    info!("Model catalog initialized ({})", config.catalog.repository);

    let predictor: Arc<dyn Predictor> = match config.predictor.url.as_deref() {
        Some(url) => {
            let predictor = HttpPredictor::new(url, config.predictor.timeout())
                .context("Failed to build prediction client")?;
            info!("Forwarding predictions to {}", predictor.endpoint());
            Arc::new(predictor)
        }
        None => {
            warn!("PREDICTOR_URL not set; /api/predict will answer 503");
            Arc::new(UnconfiguredPredictor)
        }
    };

    let app = create_router(AppState::new(repository, predictor));

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_address()))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
