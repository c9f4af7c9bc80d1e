//! qbank core — errors, configuration, and the parse result contract.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DataPaths, QbankConfig, DEFAULT_MATCH_THRESHOLD, DEFAULT_TOPICS_URL};
pub use error::{Error, Result};
pub use types::{combine_prompt, find_option_text, AnswerOption, ParseResult, TopicRef};
