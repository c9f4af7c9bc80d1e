//! Error types for qbank.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Question text is empty")]
    EmptyInput,

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;
