//! qbank runtime — the per-session analyzer that ties extraction, topic
//! classification and dataset matching together.

pub mod analyzer;
pub mod topic_source;

pub use analyzer::{AnalyzerState, QuestionAnalyzer, MULTIPLE_CHOICE};
pub use topic_source::{load_static_topics, topics_from_payload, HttpTopicSource, TopicSource};
