mod client;
mod config;
mod editor;
mod errors;
mod models;
mod render;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tokio::sync::{RwLock, Semaphore};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DocumentStore, FileStore};

const SWEEP_PERIOD: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // Load the persisted document. A corrupt store file fails startup: a
    // silent empty start would overwrite the only copy on the next save.
    let store = Arc::new(FileStore::new(config.store_path.clone()));
    let resume = store
        .load()
        .await
        .with_context(|| format!("loading resume from {}", config.store_path.display()))?
        .unwrap_or_default();
    info!(
        "Loaded resume with {} section(s) from {}",
        resume.sections.len(),
        config.store_path.display()
    );

    // Build app state
    let state = AppState {
        document: Arc::new(RwLock::new(resume)),
        store: store as Arc<dyn DocumentStore>,
        compile_permits: Arc::new(Semaphore::new(config.compile_concurrency)),
        config: config.clone(),
    };

    // Background sweeper for orphaned compile directories
    tokio::spawn(render::cleanup::run_sweeper(
        config.temp_dir.clone(),
        Duration::from_secs(config.temp_max_age_minutes * 60),
        SWEEP_PERIOD,
    ));

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Permissive CORS unless CORS_ALLOWED_ORIGINS pins an origin list.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    let Some(origins) = &config.cors_allowed_origins else {
        return Ok(CorsLayer::permissive());
    };
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
