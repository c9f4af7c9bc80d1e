//! Shared application state.

use qbank_core::QbankConfig;
use qbank_runtime::QuestionAnalyzer;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: QbankConfig,
    pub analyzer: QuestionAnalyzer,
}

impl AppState {
    pub fn new(config: QbankConfig, analyzer: QuestionAnalyzer) -> Self {
        Self { config, analyzer }
    }
}
