//! HTTP server
//!
//! Routes:
//!
//! | Method     | Path          | Description                                  |
//! |------------|---------------|----------------------------------------------|
//! | GET, POST  | `/heightmaps` | PNG crop for `x`, `y`, `dim`, `levelId`      |
//! | GET        | anything else | Static files from the configured root        |
//!
//! Composition is blocking work; each request runs it on tokio's blocking
//! pool, bounded by the configured deadline.

mod error;
mod handlers;
mod params;

pub use error::{ApiError, ServerError};
pub use params::{HeightMapParams, HeightMapRequest, ValidationError};

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::codec::PngEncoder;
use crate::compositor::Compositor;
use crate::config::ServerConfig;
use crate::heightmap::HeightMapService;
use crate::tile::DiskTileLoader;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<HeightMapService>,
    timeout: Option<Duration>,
}

impl AppState {
    pub fn new(service: Arc<HeightMapService>, timeout: Option<Duration>) -> Self {
        Self { service, timeout }
    }

    /// State for a resolved configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let loader = Arc::new(DiskTileLoader::new(config.tiles_dir()));
        let compositor = Compositor::new(loader).with_max_canvas_pixels(config.max_canvas_pixels);
        let encoder = PngEncoder::new(config.png_compression);
        let service = HeightMapService::new(compositor, Arc::new(encoder));
        Self::new(Arc::new(service), config.request_timeout)
    }
}

/// Build the application router.
pub fn router(state: AppState, static_root: &Path) -> Router {
    Router::new()
        .route(
            "/heightmaps",
            get(handlers::heightmap_request).post(handlers::heightmap_request),
        )
        .fallback_service(ServeDir::new(static_root))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process receives Ctrl-C.
///
/// # Errors
///
/// Returns [`ServerError`] if the port cannot be bound or the server fails.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::from_config(&config);
    let app = router(state, &config.root);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(
        %addr,
        root = %config.root.display(),
        tiles = %config.tiles_dir().display(),
        timeout = ?config.request_timeout,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
