//! Where topic keyword tables come from.

use std::path::Path;
use std::time::Duration;

use futures::future::BoxFuture;
use qbank_core::{Error, Result};
use qbank_ingest::{default_static_topics, StaticTopic, TopicDescriptor};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

/// A provider of the topic keyword table.
pub trait TopicSource: Send + Sync {
    /// Fetch every topic descriptor, in source order.
    fn fetch_topics(&self) -> BoxFuture<'_, Result<Vec<TopicDescriptor>>>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Fetches the keyword table as a JSON array over HTTP.
pub struct HttpTopicSource {
    client: Client,
    url: String,
}

impl HttpTopicSource {
    /// Create a source whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch(&self) -> Result<Vec<TopicDescriptor>> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamFetch(format!("HTTP {}", response.status())));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("Invalid topic payload: {}", e)))?;

        Ok(topics_from_payload(&payload))
    }
}

impl TopicSource for HttpTopicSource {
    fn fetch_topics(&self) -> BoxFuture<'_, Result<Vec<TopicDescriptor>>> {
        Box::pin(self.fetch())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Read a keyword table payload. Anything but an array is an empty table.
pub fn topics_from_payload(payload: &Value) -> Vec<TopicDescriptor> {
    payload
        .as_array()
        .map(|entries| entries.iter().filter_map(TopicDescriptor::from_value).collect())
        .unwrap_or_default()
}

/// Static topic list from `path` if present, else the built-in curriculum list.
pub fn load_static_topics(path: &Path) -> Vec<StaticTopic> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return default_static_topics(),
    };
    match serde_json::from_str::<Vec<StaticTopic>>(&data) {
        Ok(topics) => {
            info!("Loaded {} static topics from {}", topics.len(), path.display());
            topics
        }
        Err(e) => {
            warn!(
                "Ignoring malformed topic list {}: {}. Using built-in topics.",
                path.display(),
                e
            );
            default_static_topics()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbank_ingest::DEFAULT_TOPICS;
    use serde_json::json;

    #[test]
    fn test_payload_array() {
        let payload = json!([
            {"id": "T1", "name": "Planet Earth", "keywords": ["rock", "sea water"]},
            {"name": "no id"},
            {"id": "T3", "name": "Metals"}
        ]);
        let topics = topics_from_payload(&payload);
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].keywords.len(), 2);
        assert_eq!(topics[1].id, "T3");
    }

    #[test]
    fn test_payload_not_array() {
        assert!(topics_from_payload(&json!({"topics": []})).is_empty());
        assert!(topics_from_payload(&json!(null)).is_empty());
    }

    #[test]
    fn test_static_topics_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.json");
        std::fs::write(
            &path,
            r#"[{"file": "Topic1.json", "name": "Planet Earth"}, {"id": "x", "name": "Extra"}]"#,
        )
        .unwrap();
        let topics = load_static_topics(&path);
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[1].to_descriptor().id, "x");
    }

    #[test]
    fn test_static_topics_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_static_topics(&dir.path().join("missing.json"));
        assert_eq!(missing.len(), DEFAULT_TOPICS.len());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert_eq!(load_static_topics(&bad).len(), DEFAULT_TOPICS.len());
    }

    #[tokio::test]
    async fn test_http_source_unreachable_is_upstream_error() {
        let source =
            HttpTopicSource::new("http://127.0.0.1:9/topics.json", Duration::from_secs(2)).unwrap();
        let err = source.fetch_topics().await.unwrap_err();
        assert!(matches!(err, Error::UpstreamFetch(_)));
    }
}
