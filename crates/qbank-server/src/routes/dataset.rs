//! Dataset cache routes.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use qbank_resolve::DatasetCache;

use crate::dataset_loader::load_dataset_dir;
use crate::state::AppState;

/// Upper bound for a full dataset cache upload.
pub const DATASET_BODY_LIMIT: usize = 64 * 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dataset", get(get_dataset).put(put_dataset))
        .route("/dataset/reload", post(reload_dataset))
        .layer(DefaultBodyLimit::max(DATASET_BODY_LIMIT))
}

/// GET /api/dataset — current build summary.
async fn get_dataset(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!(state.analyzer.dataset().status()))
}

/// PUT /api/dataset — replace the dataset with a complete cache mapping.
async fn put_dataset(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if !body.is_object() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Dataset cache must be an object keyed by file name"
            })),
        );
    }
    let cache = DatasetCache::from_value(&body);
    let status = state.analyzer.set_dataset_from_cache(&cache);
    (StatusCode::OK, Json(serde_json::json!(status)))
}

/// POST /api/dataset/reload — rebuild from the questions directory.
async fn reload_dataset(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    match load_dataset_dir(&state.config.data_paths.questions) {
        Ok(cache) => {
            let status = state.analyzer.set_dataset_from_cache(&cache);
            (StatusCode::OK, Json(serde_json::json!(status)))
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}
