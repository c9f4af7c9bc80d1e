//! Normalisation of stored questions into matchable records.
//!
//! Stored question files come from several generations of the curation tool,
//! so the same attribute may appear under different keys. Each attribute is
//! read from a fixed priority list of keys; the first non-empty value wins.
//!
//! | attribute         | keys                                             |
//! |-------------------|--------------------------------------------------|
//! | id                | `id`, else `"{file}-{index}"`                    |
//! | option label      | `option`, `label`, else `"?"`                    |
//! | option text       | `content`, `text`                                |
//! | question text     | `question`, `questionText`, `question_text`      |
//! | topics            | non-empty `topics`, else `[topic name]`          |
//! | question type     | `type`, `questionType`                           |
//! | question number   | `questionNumber`, `question_number`              |
//! | correct option    | `correctOption`, `correct_option`                |
//! | structural answer | `structuralAnswer`, `structural_answer`          |

use once_cell::sync::Lazy;
use qbank_core::{combine_prompt, AnswerOption};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static JSON_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.json$").unwrap());

/// Normalised view of one stored question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRecord {
    pub id: String,
    pub topic_name: String,
    pub topics: Vec<String>,
    pub question_text: String,
    pub question_type: Option<String>,
    pub source: Option<String>,
    pub year: Option<i64>,
    pub paper: Option<String>,
    pub question_number: Option<String>,
    pub marks: Option<f64>,
    pub options: Vec<AnswerOption>,
    pub correct_option: Option<String>,
    pub structural_answer: Option<Value>,
    /// Question text plus one `"{label}. {text}"` line per option.
    pub combined_text: String,
}

/// Replace every HTML tag with a single space.
pub fn strip_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    HTML_TAG_RE.replace_all(text, " ").into_owned()
}

/// First key holding a non-empty, non-null value.
fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !is_blank(value))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        _ => false,
    }
}

/// Strings as-is, numbers and booleans in their JSON spelling.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(obj, keys).and_then(value_to_string)
}

fn trimmed_field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    string_field(obj, keys)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match first_present(obj, &[key])? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn float_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    // zero marks are kept, unlike other falsy values
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn normalize_option(value: &Value) -> AnswerOption {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);
    let label = string_field(obj, &["option", "label"])
        .map(|s| s.trim().to_uppercase())
        .unwrap_or_else(|| "?".to_string());
    let text = strip_html(&trimmed_field(obj, &["content", "text"]));
    AnswerOption { label, text }
}

/// Map one stored question (any supported key spelling) onto a [`DatasetRecord`].
///
/// `index` is the question's position in its file and only feeds the
/// generated id when the question carries none.
pub fn normalize_question(
    question: &Value,
    topic_name: &str,
    file_name: &str,
    index: usize,
) -> DatasetRecord {
    let empty = Map::new();
    let obj = question.as_object().unwrap_or(&empty);

    let options: Vec<AnswerOption> = obj
        .get("options")
        .and_then(Value::as_array)
        .map(|opts| opts.iter().map(normalize_option).collect())
        .unwrap_or_default();

    let question_text = strip_html(&trimmed_field(
        obj,
        &["question", "questionText", "question_text"],
    ));

    let topics: Vec<String> = obj
        .get("topics")
        .and_then(Value::as_array)
        .map(|ts| ts.iter().filter_map(value_to_string).collect::<Vec<_>>())
        .filter(|ts| !ts.is_empty())
        .unwrap_or_else(|| vec![topic_name.to_string()]);

    let correct_option = string_field(obj, &["correctOption", "correct_option"])
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty());

    let combined_text = combine_prompt(&question_text, &options);

    DatasetRecord {
        id: string_field(obj, &["id"]).unwrap_or_else(|| format!("{file_name}-{index}")),
        topic_name: topic_name.to_string(),
        topics,
        question_text,
        question_type: string_field(obj, &["type", "questionType"]),
        source: string_field(obj, &["source"]),
        year: int_field(obj, "year").filter(|&y| y != 0),
        paper: string_field(obj, &["paper"]),
        question_number: string_field(obj, &["questionNumber", "question_number"]),
        marks: float_field(obj, "marks"),
        options,
        correct_option,
        structural_answer: first_present(obj, &["structuralAnswer", "structural_answer"])
            .cloned(),
        combined_text,
    }
}

/// One question-bank file inside a [`DatasetCache`].
#[derive(Debug, Clone, PartialEq)]
pub struct CachedFile {
    pub file_name: String,
    /// The persisted file body: `{metadata: {topic}, questions: [...]}`.
    pub content: Value,
}

impl CachedFile {
    /// Topic declared in the file metadata, else the file name without `.json`.
    pub fn topic_name(&self) -> String {
        self.content
            .get("metadata")
            .and_then(|m| m.get("topic"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| JSON_SUFFIX_RE.replace(&self.file_name, "").into_owned())
    }

    /// The `questions` array, or `None` when the file has none.
    pub fn questions(&self) -> Option<&Vec<Value>> {
        self.content.get("questions").and_then(Value::as_array)
    }

    /// Normalise every question of this file, in order.
    pub fn records(&self) -> Vec<DatasetRecord> {
        let Some(questions) = self.questions() else {
            return Vec::new();
        };
        let topic_name = self.topic_name();
        questions
            .iter()
            .enumerate()
            .map(|(idx, q)| normalize_question(q, &topic_name, &self.file_name, idx))
            .collect()
    }
}

/// Everything the curation tool has loaded, keyed by storage file name in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetCache {
    pub files: Vec<CachedFile>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file body. A later file with the same name replaces the earlier one in place.
    pub fn insert(&mut self, file_name: impl Into<String>, content: Value) {
        let file_name = file_name.into();
        match self.files.iter_mut().find(|f| f.file_name == file_name) {
            Some(existing) => existing.content = content,
            None => self.files.push(CachedFile { file_name, content }),
        }
    }

    /// Read the wire mapping `{ "<file>": { "content": {...}, ... } }`.
    ///
    /// Entries without a `content` object are kept but contribute no records.
    /// A non-object value yields an empty cache.
    pub fn from_value(value: &Value) -> Self {
        let mut cache = Self::new();
        if let Some(map) = value.as_object() {
            for (file_name, entry) in map {
                let content = entry.get("content").cloned().unwrap_or(Value::Null);
                cache.insert(file_name.clone(), content);
            }
        }
        cache
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
