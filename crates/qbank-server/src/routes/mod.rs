//! HTTP route handlers.

pub mod analyze;
pub mod dataset;
pub mod stats;
pub mod topics;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(analyze::compat_routes())
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(analyze::routes())
        .merge(dataset::routes())
        .merge(topics::routes())
        .merge(stats::routes())
}
