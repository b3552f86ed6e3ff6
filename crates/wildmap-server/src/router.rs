use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Create the router: API routes first, the static bundle for everything else.
pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/add", post(handlers::add_entry))
        .route("/animals.json", get(handlers::list_animals))
        .route("/trees.json", get(handlers::list_trees))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
