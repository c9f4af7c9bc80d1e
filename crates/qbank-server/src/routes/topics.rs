//! Topic table route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/topics", get(get_topics))
}

/// GET /api/topics — loaded topic descriptors (loads them on first use).
async fn get_topics(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let table = state.analyzer.ensure_topics_loaded().await;
    Json(serde_json::json!({
        "topics": table.topics(),
        "total": table.len(),
    }))
}
