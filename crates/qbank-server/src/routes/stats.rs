//! Analyzer stats route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

/// GET /api/stats — lifecycle state and dataset size.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let analyzer = &state.analyzer;
    let dataset = analyzer.dataset().status();

    Json(serde_json::json!({
        "state": analyzer.state(),
        "topics": analyzer.topics().map(|t| t.len()).unwrap_or(0),
        "datasetRecords": dataset.records,
        "datasetFiles": dataset.files,
        "matchThreshold": analyzer.match_threshold(),
        "topicsUrl": state.config.topics_url,
    }))
}
