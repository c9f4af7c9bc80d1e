//! Keyword-based topic classification.

use std::collections::HashMap;

use qbank_core::TopicRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A topic and the keywords that vote for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl TopicDescriptor {
    /// Read one entry of the remote keyword table. Entries lacking an id or name are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = match obj.get("id")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let name = obj.get("name")?.as_str()?.to_string();
        let keywords = obj
            .get("keywords")
            .and_then(Value::as_array)
            .map(|kws| {
                kws.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { id, name, keywords })
    }

    pub fn to_ref(&self) -> TopicRef {
        TopicRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Entry of the locally configured topic list used when the keyword table is unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticTopic {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    pub name: String,
}

impl StaticTopic {
    pub fn new(file: &str, name: &str) -> Self {
        Self {
            id: None,
            file: Some(file.to_string()),
            name: name.to_string(),
        }
    }

    /// Fallback descriptor: id from `id`, then `file`, then `name`.
    /// The lowercased name is the only keyword.
    pub fn to_descriptor(&self) -> TopicDescriptor {
        let id = self
            .id
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.file.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| self.name.clone());
        TopicDescriptor {
            id,
            name: self.name.clone(),
            keywords: vec![self.name.to_lowercase()],
        }
    }
}

/// Built-in curriculum topics, one question-bank file each.
pub const DEFAULT_TOPICS: &[(&str, &str)] = &[
    ("Topic1.json", "Planet Earth"),
    ("Topic2.json", "Microscopic World I"),
    ("Topic3.json", "Metals"),
    ("Topic4.json", "Acids and Bases"),
    ("Topic5.json", "Fossil Fuels and Carbon Compounds"),
    ("Topic6.json", "Microscopic World II"),
    ("Topic7.json", "Redox Reactions, Chemical Cells and Electrolysis"),
    ("Topic8.json", "Chemical Reactions and Energy"),
    ("Topic9.json", "Rate of Reaction"),
    ("Topic10.json", "Chemical Equilibrium"),
    ("Topic11.json", "Chemistry of Carbon Compounds"),
    ("Topic12.json", "Patterns in the Chemical World"),
];

/// Built-in static topic list.
pub fn default_static_topics() -> Vec<StaticTopic> {
    DEFAULT_TOPICS
        .iter()
        .map(|(file, name)| StaticTopic::new(file, name))
        .collect()
}

/// Loaded topics in their original order, plus a lowercase-name lookup.
#[derive(Debug, Clone, Default)]
pub struct TopicTable {
    topics: Vec<TopicDescriptor>,
    lookup: HashMap<String, usize>,
}

impl TopicTable {
    pub fn new(topics: Vec<TopicDescriptor>) -> Self {
        let mut lookup = HashMap::with_capacity(topics.len());
        for (idx, topic) in topics.iter().enumerate() {
            if !topic.name.is_empty() {
                // later duplicates win
                lookup.insert(topic.name.to_lowercase(), idx);
            }
        }
        Self { topics, lookup }
    }

    /// Table made of fallback descriptors.
    pub fn from_static(topics: &[StaticTopic]) -> Self {
        Self::new(topics.iter().map(StaticTopic::to_descriptor).collect())
    }

    pub fn topics(&self) -> &[TopicDescriptor] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Find a topic by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&TopicDescriptor> {
        self.lookup
            .get(&name.to_lowercase())
            .map(|&idx| &self.topics[idx])
    }

    /// Score each topic by how many of its keywords occur in `text`.
    ///
    /// Only a strictly higher score replaces the current best, so ties keep the
    /// earlier topic. No hits at all yields [`TopicRef::unknown`].
    pub fn predict_topic(&self, text: &str) -> TopicRef {
        if text.is_empty() {
            return TopicRef::unknown();
        }
        let lowered = text.to_lowercase();

        let mut best: Option<&TopicDescriptor> = None;
        let mut best_score = 0usize;
        for topic in &self.topics {
            let score = topic
                .keywords
                .iter()
                .filter(|kw| !kw.is_empty() && lowered.contains(&kw.to_lowercase()))
                .count();
            if score > best_score {
                best_score = score;
                best = Some(topic);
            }
        }

        best.map(TopicDescriptor::to_ref)
            .unwrap_or_else(TopicRef::unknown)
    }
}
