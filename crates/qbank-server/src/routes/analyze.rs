//! Question analysis routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use qbank_core::{AnswerOption, Error, ParseResult};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::state::AppState;

/// `POST /analyze` — response shape of the original standalone analysis server.
pub fn compat_routes() -> Router<Arc<AppState>> {
    Router::new().route("/analyze", post(analyze_compat))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analyze", post(analyze))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

/// Snake-case subset of [`ParseResult`].
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub source: Option<String>,
    pub year: Option<i64>,
    pub question_number: Option<String>,
    pub topic_id: String,
    pub topic_name: String,
    pub question_type: Option<String>,
    pub correct_option: Option<String>,
    pub correct_option_text: Option<String>,
    pub match_confidence: Option<f64>,
    pub prompt: String,
    pub answer_options: Vec<AnswerOption>,
}

impl From<ParseResult> for AnalyzeResponse {
    fn from(result: ParseResult) -> Self {
        Self {
            source: result.source,
            year: result.year,
            question_number: result.question_number,
            topic_id: result.topic_id,
            topic_name: result.topic_name,
            question_type: result.question_type,
            correct_option: result.correct_option,
            correct_option_text: result.correct_option_text,
            match_confidence: result.match_confidence,
            prompt: result.prompt,
            answer_options: result.answer_options,
        }
    }
}

fn error_response(status: StatusCode, message: String) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": message })))
}

/// POST /analyze — analyze pasted text, snake_case response.
async fn analyze_compat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    if req.text.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No text provided".into());
    }

    let preview: String = req.text.chars().take(50).collect();
    info!("Analyzing text: {}...", preview);

    match state.analyzer.analyze(&req.text).await {
        Ok(result) => (
            StatusCode::OK,
            Json(serde_json::json!(AnalyzeResponse::from(result))),
        ),
        Err(e) => {
            error!("Error during analysis: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// POST /api/analyze — full parse result.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.analyzer.analyze(&req.text).await {
        Ok(result) => (StatusCode::OK, Json(serde_json::json!(result))),
        Err(Error::EmptyInput) => {
            error_response(StatusCode::BAD_REQUEST, Error::EmptyInput.to_string())
        }
        Err(e) => {
            error!("Error during analysis: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
