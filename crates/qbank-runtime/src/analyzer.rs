//! Session-scoped question analyzer.
//!
//! One [`QuestionAnalyzer`] owns everything a session needs: the topic table
//! (loaded lazily, once), the dataset vector cache, and the match threshold.
//! Independent analyzers never share state.

use std::sync::Arc;

use qbank_core::{Error, ParseResult, QbankConfig, Result, TopicRef, DEFAULT_MATCH_THRESHOLD};
use qbank_ingest::{StaticTopic, TopicTable};
use qbank_resolve::{BestMatch, DatasetCache, DatasetIndex, DatasetRecord, DatasetStatus};
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::topic_source::{load_static_topics, HttpTopicSource, TopicSource};

/// Question type inferred for records with at least two options.
pub const MULTIPLE_CHOICE: &str = "Multiple-choice";

/// Lifecycle of an analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerState {
    /// Topics not loaded yet.
    Uninitialized,
    /// Topics loaded; the dataset may be empty or populated.
    Ready,
}

/// Parses pasted questions and matches them against a question-bank dataset.
pub struct QuestionAnalyzer {
    source: Arc<dyn TopicSource>,
    fallback: Vec<StaticTopic>,
    topics: OnceCell<TopicTable>,
    index: DatasetIndex,
    match_threshold: f64,
}

impl QuestionAnalyzer {
    /// Create an analyzer that loads topics from `source`, falling back to `fallback`.
    pub fn new(source: Arc<dyn TopicSource>, fallback: Vec<StaticTopic>) -> Self {
        Self {
            source,
            fallback,
            topics: OnceCell::new(),
            index: DatasetIndex::new(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    /// Build from configuration: HTTP keyword table plus the configured static list.
    pub fn from_config(config: &QbankConfig) -> Result<Self> {
        let source = HttpTopicSource::new(config.topics_url.clone(), config.topics_timeout)?;
        let fallback = load_static_topics(&config.data_paths.topics_file);
        Ok(Self::new(Arc::new(source), fallback).with_match_threshold(config.match_threshold))
    }

    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn match_threshold(&self) -> f64 {
        self.match_threshold
    }

    pub fn state(&self) -> AnalyzerState {
        if self.topics.initialized() {
            AnalyzerState::Ready
        } else {
            AnalyzerState::Uninitialized
        }
    }

    /// Loaded topic table, if the load has completed.
    pub fn topics(&self) -> Option<&TopicTable> {
        self.topics.get()
    }

    /// Load the topic table once.
    ///
    /// Concurrent callers arriving before the first load completes all wait
    /// on that same load. A failing source never fails the caller: the
    /// static list is used instead.
    pub async fn ensure_topics_loaded(&self) -> &TopicTable {
        self.topics.get_or_init(|| self.load_topics()).await
    }

    async fn load_topics(&self) -> TopicTable {
        match self.source.fetch_topics().await {
            Ok(topics) => {
                info!("Loaded {} topics from {}", topics.len(), self.source.describe());
                TopicTable::new(topics)
            }
            Err(e) => {
                warn!(
                    "Failed to fetch topic keywords from {}: {}. Using fallback list only.",
                    self.source.describe(),
                    e
                );
                TopicTable::from_static(&self.fallback)
            }
        }
    }

    /// Rebuild the dataset from the complete current cache.
    pub fn set_dataset_from_cache(&self, cache: &DatasetCache) -> DatasetStatus {
        self.index.set_dataset_from_cache(cache)
    }

    pub fn dataset(&self) -> &DatasetIndex {
        &self.index
    }

    pub fn find_best_match(&self, text: &str) -> Option<BestMatch> {
        self.index.find_best_match(text)
    }

    /// Topic prediction against the loaded table; unknown until topics are loaded.
    pub fn predict_topic(&self, text: &str) -> TopicRef {
        match self.topics.get() {
            Some(table) => table.predict_topic(text),
            None => TopicRef::unknown(),
        }
    }

    /// Draft parse without dataset matching.
    pub fn parse(&self, raw_text: &str) -> Result<ParseResult> {
        let empty;
        let table = match self.topics.get() {
            Some(table) => table,
            None => {
                empty = TopicTable::default();
                &empty
            }
        };
        qbank_ingest::parse(raw_text, table)
    }

    /// Parse `raw_text`, match it against the dataset, and overlay the
    /// matched record when its similarity clears the threshold.
    ///
    /// Below the threshold only `match_confidence` and `matched_dataset_id`
    /// are filled in.
    pub async fn analyze(&self, raw_text: &str) -> Result<ParseResult> {
        let topics = self.ensure_topics_loaded().await;
        if raw_text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut parsed = qbank_ingest::parse(raw_text, topics)?;
        let combined = parsed.combined_text();

        if let Some(best) = self.index.find_best_match(&combined) {
            parsed.match_confidence = Some(round3(best.score));
            parsed.matched_dataset_id = Some(best.record.id.clone());
            if best.score >= self.match_threshold {
                debug!("Overlaying dataset record {}", best.record.id);
                apply_record_overlay(&mut parsed, &best.record, topics);
            }
        }

        Ok(parsed)
    }
}

fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Copy the authoritative fields of `record` onto `parsed`.
///
/// The prompt is only filled when the draft has none; options are replaced
/// wholesale when the record has at least two.
fn apply_record_overlay(parsed: &mut ParseResult, record: &DatasetRecord, topics: &TopicTable) {
    parsed.dataset_topics = if record.topics.is_empty() {
        vec![record.topic_name.clone()]
    } else {
        record.topics.clone()
    };

    let topic_name = if record.topic_name.is_empty() {
        parsed.topic_name.clone()
    } else {
        record.topic_name.clone()
    };
    if !topic_name.is_empty() {
        match topics.lookup(&topic_name) {
            Some(entry) => {
                parsed.topic_id = entry.id.clone();
                parsed.topic_name = entry.name.clone();
            }
            None => parsed.topic_name = topic_name,
        }
    }

    let has_choices = record.options.len() >= 2;
    parsed.question_type = record
        .question_type
        .clone()
        .or_else(|| has_choices.then(|| MULTIPLE_CHOICE.to_string()))
        .or_else(|| parsed.question_type.take());

    parsed.correct_option = record
        .correct_option
        .clone()
        .or_else(|| parsed.correct_option.take())
        .map(|c| c.to_uppercase());

    if has_choices {
        parsed.answer_options = record.options.clone();
        if let Some(correct) = parsed.correct_option.as_deref() {
            if let Some(option) = record.options.iter().find(|opt| opt.label == correct) {
                parsed.correct_option_text = Some(option.text.clone());
            }
        }
    }

    if parsed.prompt.is_empty() && !record.question_text.is_empty() {
        parsed.prompt = record.question_text.clone();
    }

    if record.structural_answer.is_some() {
        parsed.structured_answer = record.structural_answer.clone();
    }
    parsed.marks = record.marks.or(parsed.marks);
    if record.paper.is_some() {
        parsed.paper = record.paper.clone();
    }
    if let Some(source) = record.source.as_ref().filter(|s| !s.is_empty()) {
        parsed.source = Some(source.clone());
    }
    parsed.year = record.year.or(parsed.year);
    if let Some(number) = record.question_number.as_ref().filter(|n| !n.is_empty()) {
        parsed.question_number = Some(number.clone());
    }
}
