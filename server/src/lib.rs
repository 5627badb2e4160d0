//! Ecoleta Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//! - handlers: HTTP handlers that bridge clients to repositories

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod domain;
pub mod handlers;
pub mod repository;

use config::ServerConfig;
use repository::{init_db, DbState, ItemRepository, PointRepository};

/// Largest accepted request body (multipart uploads included)
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub item_repo: Arc<ItemRepository>,
    pub point_repo: Arc<PointRepository>,
    pub uploads_dir: PathBuf,
    /// Held while an upload is stored, linked to a point or discarded
    pub upload_lock: Arc<Mutex<()>>,
    pub public_url: String,
}

impl AppState {
    pub fn new(db_state: DbState, uploads_dir: PathBuf, public_url: String) -> Self {
        Self {
            item_repo: Arc::new(ItemRepository::new(db_state.conn.clone())),
            point_repo: Arc::new(PointRepository::new(db_state.conn)),
            uploads_dir,
            upload_lock: Arc::new(Mutex::new(())),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }
}

/// All API routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/items", get(handlers::list_items))
        .route("/points", get(handlers::list_points).post(handlers::create_point))
        .route("/points/{id}", get(handlers::get_point))
        .route("/uploads/{*path}", get(handlers::serve_upload))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the database, prepare the uploads directory and serve until shutdown
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    log::info!("Starting Ecoleta server on {}", config.bind);

    handlers::install_catalog_images(&config.uploads_dir)
        .await
        .with_context(|| format!("preparing uploads dir {}", config.uploads_dir.display()))?;

    let db_state = init_db(&config.database).await.map_err(anyhow::Error::msg)?;
    log::info!("Database ready at {}", config.database.display());

    let state = AppState::new(db_state, config.uploads_dir.clone(), config.public_url.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    rolling_logger::info(&format!("Listening on http://{}", config.bind));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    log::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
