//! In-memory vector cache over the dataset and nearest-record lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::record::{DatasetCache, DatasetRecord};
use crate::vector::{cosine_similarity, vectorize, SparseVector};

/// A record together with its precomputed vector.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedVector {
    pub record: DatasetRecord,
    pub vector: SparseVector,
}

/// One complete build of the matchable set.
#[derive(Debug, Clone, Default)]
pub struct VectorCache {
    pub entries: Vec<CachedVector>,
    pub file_count: usize,
    /// SHA-256 over record ids and combined texts, in order.
    pub fingerprint: String,
    pub built_at: Option<DateTime<Utc>>,
}

impl VectorCache {
    fn build(cache: &DatasetCache) -> Self {
        let entries: Vec<CachedVector> = cache
            .files
            .iter()
            .flat_map(|file| file.records())
            .filter(|record| !record.combined_text.is_empty())
            .map(|record| {
                let vector = vectorize(&record.combined_text);
                CachedVector { record, vector }
            })
            .collect();

        let mut hasher = Sha256::new();
        for entry in &entries {
            hasher.update(entry.record.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(entry.record.combined_text.as_bytes());
            hasher.update([0u8]);
        }

        Self {
            entries,
            file_count: cache.len(),
            fingerprint: hex::encode(hasher.finalize()),
            built_at: Some(Utc::now()),
        }
    }
}

/// Summary of the current dataset build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStatus {
    pub records: usize,
    pub files: usize,
    pub fingerprint: String,
    pub loaded_at: Option<String>,
}

/// Closest dataset record to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub record: DatasetRecord,
    pub score: f64,
}

/// Thread-safe dataset index.
///
/// Rebuilds happen off to the side and are published with a single `Arc`
/// swap, so a lookup running concurrently sees either the old or the new
/// cache, never a partial one.
pub struct DatasetIndex {
    inner: RwLock<Arc<VectorCache>>,
}

impl Default for DatasetIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(VectorCache::default())),
        }
    }

    /// Replace the whole matchable set with the records of `cache`.
    ///
    /// Always a full rebuild; callers pass the complete current cache.
    pub fn set_dataset_from_cache(&self, cache: &DatasetCache) -> DatasetStatus {
        let built = Arc::new(VectorCache::build(cache));
        info!(
            "Dataset rebuilt: {} records from {} files",
            built.entries.len(),
            built.file_count
        );
        *self.inner.write() = built;
        self.status()
    }

    /// Current build, shared.
    pub fn snapshot(&self) -> Arc<VectorCache> {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status(&self) -> DatasetStatus {
        let cache = self.snapshot();
        DatasetStatus {
            records: cache.entries.len(),
            files: cache.file_count,
            fingerprint: cache.fingerprint.clone(),
            loaded_at: cache.built_at.map(|t| t.to_rfc3339()),
        }
    }

    /// Highest-scoring record for `text`; the first seen wins ties.
    ///
    /// Returns `None` for blank text, an empty dataset, or a query without tokens.
    pub fn find_best_match(&self, text: &str) -> Option<BestMatch> {
        if text.trim().is_empty() {
            return None;
        }
        let cache = self.snapshot();
        if cache.entries.is_empty() {
            return None;
        }
        let query = vectorize(text);
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(&CachedVector, f64)> = None;
        for entry in &cache.entries {
            let score = cosine_similarity(&query, &entry.vector);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((entry, score));
            }
        }

        best.map(|(entry, score)| {
            debug!("Best dataset match {} (score {:.3})", entry.record.id, score);
            BestMatch {
                record: entry.record.clone(),
                score,
            }
        })
    }
}
