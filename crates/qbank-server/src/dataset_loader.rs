//! Reads persisted question-bank files from the data directory.

use std::path::Path;

use qbank_core::Result;
use qbank_resolve::DatasetCache;
use serde_json::Value;
use tracing::{debug, warn};

/// Load every `*.json` file under `dir`, ordered by file name.
///
/// Each file body (`{metadata, questions}`) becomes one cache entry.
/// Unreadable or malformed files are skipped with a warning.
pub fn load_dataset_dir(dir: &Path) -> Result<DatasetCache> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();
    paths.sort();

    let mut cache = DatasetCache::new();
    for path in paths {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        let content: Value = match std::fs::read_to_string(&path)
            .map_err(qbank_core::Error::from)
            .and_then(|data| serde_json::from_str(&data).map_err(Into::into))
        {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping dataset file {}: {}", path.display(), e);
                continue;
            }
        };

        debug!("Loaded dataset file {}", file_name);
        cache.insert(file_name, content);
    }

    Ok(cache)
}
