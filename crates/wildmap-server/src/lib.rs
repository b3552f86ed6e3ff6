//! HTTP backend for Wildmap: entry submission, stored collections and the
//! static frontend bundle, all on one origin.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use wildmap_core::Config;
use wildmap_services::{AnnotationService, JsonFileStore};

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;

/// Open the store and serve until ctrl-c.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::open(&config.storage.data_dir)?;
    let state = Arc::new(AppState::new(Arc::new(AnnotationService::new(Arc::new(
        store,
    )))));
    let app = create_router(state, &config.server.static_dir);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        static_dir = %config.server.static_dir.display(),
        "Listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
