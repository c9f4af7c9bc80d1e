//! qbank ingest — turns pasted exam text into a draft parse and predicts its topic.

pub mod extract;

pub use extract::topics::{
    default_static_topics, StaticTopic, TopicDescriptor, TopicTable, DEFAULT_TOPICS,
};
pub use extract::{parse, HeaderMetadata};
