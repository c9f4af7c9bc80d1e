//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Remote topic keyword table.
pub const DEFAULT_TOPICS_URL: &str =
    "https://raw.githubusercontent.com/Revampes/QuestionBankLLM/main/data/topics.json";

/// Minimum cosine similarity before a dataset record overlays a parsed draft.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.65;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOPICS_TIMEOUT_SECS: u64 = 10;

/// Paths to all qbank data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Persisted question-bank files (`data/questions/`).
    pub questions: PathBuf,
    /// Optional static topic list overriding the built-in one (`data/topics.json`).
    pub topics_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            questions: root.join("questions"),
            topics_file: root.join("topics.json"),
            root,
        };
        std::fs::create_dir_all(&paths.questions)?;
        Ok(paths)
    }
}

/// Top-level qbank configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QbankConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Where the topic keyword table is fetched from.
    pub topics_url: String,
    /// Upper bound on the topic fetch before falling back to the static list.
    pub topics_timeout: Duration,
    /// Overlay threshold for dataset matches.
    pub match_threshold: f64,
}

impl QbankConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Same as [`QbankConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(
        data_dir: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let topics_url = lookup("QBANK_TOPICS_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOPICS_URL.to_string());

        let timeout_secs = lookup("QBANK_TOPICS_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOPICS_TIMEOUT_SECS);

        let match_threshold = match lookup("QBANK_MATCH_THRESHOLD") {
            Some(raw) => {
                let value: f64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("QBANK_MATCH_THRESHOLD is not a number: {raw}"))
                })?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(Error::Config(format!(
                        "QBANK_MATCH_THRESHOLD must be within 0..=1, got {value}"
                    )));
                }
                value
            }
            None => DEFAULT_MATCH_THRESHOLD,
        };

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            topics_url,
            topics_timeout: Duration::from_secs(timeout_secs),
            match_threshold,
        })
    }
}
