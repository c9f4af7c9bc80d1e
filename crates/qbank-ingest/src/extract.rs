//! Best-effort structural extraction of a pasted exam question.
//!
//! The first non-blank line may be a header (`DSE 2012 Q25`); the remaining
//! lines split into a stem and labelled options. An explicitly stated answer
//! is searched for in the whole raw text, not only the stem.

pub mod answer;
pub mod metadata;
pub mod options;
pub mod topics;

use qbank_core::{Error, ParseResult, Result};
use tracing::debug;

pub use answer::extract_answer;
pub use metadata::{extract_metadata, HeaderMetadata};
pub use options::{parse_option_line, split_prompt_and_options, SplitContent};
use topics::TopicTable;

/// Build a draft parse of `raw_text`, classifying the stem against `topics`.
///
/// Fails with [`Error::EmptyInput`] when the text has no non-blank line.
pub fn parse(raw_text: &str, topics: &TopicTable) -> Result<ParseResult> {
    let normalized = raw_text.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Err(Error::EmptyInput);
    }

    let lines: Vec<&str> = normalized.split('\n').map(str::trim_end).collect();
    let first_non_empty = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .ok_or(Error::EmptyInput)?;

    let header = extract_metadata(lines[first_non_empty]);
    let content_lines = if header.is_some() {
        &lines[first_non_empty + 1..]
    } else {
        &lines[first_non_empty..]
    };

    let split = split_prompt_and_options(content_lines);
    let prompt = split.prompt();
    let topic = topics.predict_topic(&prompt);
    let explicit_answer = extract_answer(raw_text);

    debug!(
        header = header.is_some(),
        options = split.options.len(),
        answer = ?explicit_answer,
        "Parsed question draft"
    );

    let mut parsed = ParseResult {
        source: header.as_ref().map(|h| h.source.clone()),
        year: header.as_ref().map(|h| h.year),
        question_number: header.map(|h| h.question_number),
        prompt,
        raw_prompt: content_lines.join("\n").trim().to_string(),
        answer_options: split.options,
        topic_id: topic.id,
        topic_name: topic.name,
        correct_option: explicit_answer,
        ..Default::default()
    };
    if let Some(answer) = parsed.correct_option.as_deref() {
        parsed.correct_option_text = parsed.option_text(answer);
    }

    Ok(parsed)
}
