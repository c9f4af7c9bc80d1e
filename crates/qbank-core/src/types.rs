//! Parse result contract shared by the extractor, matcher and HTTP layer.

use serde::{Deserialize, Serialize};

/// Topic id reported when no keyword matches.
pub const UNKNOWN_TOPIC_ID: &str = "UNKNOWN";
/// Topic name reported when no keyword matches.
pub const UNKNOWN_TOPIC_NAME: &str = "Topic not found";

/// A labelled answer option (`A`..`H`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub text: String,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// A resolved topic identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRef {
    pub id: String,
    pub name: String,
}

impl TopicRef {
    /// Sentinel for text that no topic keyword matched.
    pub fn unknown() -> Self {
        Self {
            id: UNKNOWN_TOPIC_ID.to_string(),
            name: UNKNOWN_TOPIC_NAME.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.id == UNKNOWN_TOPIC_ID
    }
}

/// Structured view of one pasted question. Built fresh per analysis and owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub source: Option<String>,
    pub year: Option<i64>,
    pub question_number: Option<String>,
    pub prompt: String,
    pub raw_prompt: String,
    pub answer_options: Vec<AnswerOption>,
    pub topic_id: String,
    pub topic_name: String,
    pub question_type: Option<String>,
    pub correct_option: Option<String>,
    pub correct_option_text: Option<String>,
    pub structured_answer: Option<serde_json::Value>,
    /// Cosine similarity of the nearest dataset record, rounded to 3 decimals.
    pub match_confidence: Option<f64>,
    pub matched_dataset_id: Option<String>,
    pub marks: Option<f64>,
    pub paper: Option<String>,
    pub dataset_topics: Vec<String>,
}

impl ParseResult {
    /// Prompt plus one `"{label}. {text}"` line per option.
    pub fn combined_text(&self) -> String {
        combine_prompt(&self.prompt, &self.answer_options)
    }

    /// Text of the option whose label equals `label`.
    pub fn option_text(&self, label: &str) -> Option<String> {
        find_option_text(&self.answer_options, label)
    }
}

/// Join a stem and its options into the text that gets vectorized.
pub fn combine_prompt(prompt: &str, options: &[AnswerOption]) -> String {
    let mut lines = Vec::with_capacity(options.len() + 1);
    if !prompt.is_empty() {
        lines.push(prompt.to_string());
    }
    for opt in options {
        lines.push(format!("{}. {}", opt.label, opt.text));
    }
    lines.join("\n").trim().to_string()
}

/// Case-insensitive label lookup over an option list.
pub fn find_option_text(options: &[AnswerOption], label: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.label.eq_ignore_ascii_case(label))
        .map(|opt| opt.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_prompt() {
        let options = vec![AnswerOption::new("A", "272 cm3"), AnswerOption::new("B", "544 cm3")];
        assert_eq!(
            combine_prompt("What volume?", &options),
            "What volume?\nA. 272 cm3\nB. 544 cm3"
        );
        assert_eq!(combine_prompt("", &options), "A. 272 cm3\nB. 544 cm3");
        assert_eq!(combine_prompt("", &[]), "");
    }

    #[test]
    fn test_parse_result_serializes_camel_case() {
        let result = ParseResult {
            question_number: Some("25".into()),
            topic_id: UNKNOWN_TOPIC_ID.into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["questionNumber"], "25");
        assert_eq!(json["topicId"], "UNKNOWN");
        assert!(json["matchConfidence"].is_null());
        assert!(json["answerOptions"].is_array());
        assert!(json["datasetTopics"].is_array());
    }

    #[test]
    fn test_unknown_topic() {
        let topic = TopicRef::unknown();
        assert!(topic.is_unknown());
        assert_eq!(topic.name, "Topic not found");
    }
}
