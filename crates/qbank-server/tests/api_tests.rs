//! HTTP API tests: the router runs on an ephemeral port and is driven with a
//! real client.

use std::sync::Arc;

use futures::future::BoxFuture;
use qbank_core::{QbankConfig, Result};
use qbank_ingest::TopicDescriptor;
use qbank_runtime::{QuestionAnalyzer, TopicSource};
use qbank_server::{build_router, AppState};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

struct FixedTopics;

impl TopicSource for FixedTopics {
    fn fetch_topics(&self) -> BoxFuture<'_, Result<Vec<TopicDescriptor>>> {
        Box::pin(async {
            Ok(vec![
                TopicDescriptor {
                    id: "Topic3".into(),
                    name: "Metals".into(),
                    keywords: vec!["metal".into(), "corrodes".into()],
                },
                TopicDescriptor {
                    id: "Topic4".into(),
                    name: "Acids and Bases".into(),
                    keywords: vec!["acid".into()],
                },
            ])
        })
    }

    fn describe(&self) -> String {
        "fixed".into()
    }
}

const QUESTION: &str = "DSE 2014 Q12\n\
Which of the following metals corrodes fastest in sea water?\n\
A. Copper\n\
B. Iron\n\
C. Silver\n\
D. Gold\n";

fn dataset() -> Value {
    json!({
        "Topic3.json": {
            "sha": "0123abcd",
            "content": {
                "metadata": {"topic": "Metals"},
                "questions": [{
                    "id": "DSE2014_12",
                    "question": "Which of the following metals corrodes fastest in sea water?",
                    "options": [
                        {"option": "A", "content": "Copper"},
                        {"option": "B", "content": "Iron"},
                        {"option": "C", "content": "Silver"},
                        {"option": "D", "content": "Gold"}
                    ],
                    "correctOption": "B",
                    "paper": "1A"
                }]
            }
        }
    })
}

async fn spawn_app() -> (String, TempDir) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = QbankConfig::from_lookup(tmp_dir.path(), |_| None).expect("config");
    let analyzer = QuestionAnalyzer::new(Arc::new(FixedTopics), Vec::new());
    let state = Arc::new(AppState::new(config, analyzer));

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), tmp_dir)
}

#[tokio::test]
async fn test_compat_analyze_shape() {
    let (base, _dir) = spawn_app().await;
    let client = Client::new();

    let resp = client
        .post(format!("{}/analyze", base))
        .json(&json!({ "text": QUESTION }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    assert_eq!(body["source"], "DSE");
    assert_eq!(body["year"], 2014);
    assert_eq!(body["question_number"], "12");
    assert_eq!(body["topic_id"], "Topic3");
    assert_eq!(body["topic_name"], "Metals");
    assert!(body["match_confidence"].is_null());
    assert_eq!(body["answer_options"].as_array().unwrap().len(), 4);
    assert_eq!(body["answer_options"][0]["label"], "A");
    assert!(body.get("rawPrompt").is_none());
}

#[tokio::test]
async fn test_compat_analyze_requires_text() {
    let (base, _dir) = spawn_app().await;
    let resp = Client::new()
        .post(format!("{}/analyze", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No text provided");
}

#[tokio::test]
async fn test_api_analyze_blank_is_bad_request() {
    let (base, _dir) = spawn_app().await;
    let resp = Client::new()
        .post(format!("{}/api/analyze", base))
        .json(&json!({ "text": "   \n  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Question text is empty");
}

#[tokio::test]
async fn test_put_dataset_then_analyze_overlays() {
    let (base, _dir) = spawn_app().await;
    let client = Client::new();

    let resp = client
        .put(format!("{}/api/dataset", base))
        .json(&dataset())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let status: Value = resp.json().await.unwrap();
    assert_eq!(status["records"], 1);
    assert_eq!(status["files"], 1);
    assert!(status["fingerprint"].as_str().unwrap().len() == 64);

    let body: Value = client
        .post(format!("{}/api/analyze", base))
        .json(&json!({ "text": QUESTION }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["matchConfidence"], 1.0);
    assert_eq!(body["matchedDatasetId"], "DSE2014_12");
    assert_eq!(body["correctOption"], "B");
    assert_eq!(body["correctOptionText"], "Iron");
    assert_eq!(body["questionType"], "Multiple-choice");
    assert_eq!(body["paper"], "1A");
    assert_eq!(body["datasetTopics"], json!(["Metals"]));
}

#[tokio::test]
async fn test_put_dataset_accepts_large_cache() {
    let (base, _dir) = spawn_app().await;

    // larger than axum's 2 MB default body limit
    let stem = "sodium chloride solution ".repeat(120_000);
    let body = json!({
        "Topic5.json": {"content": {
            "metadata": {"topic": "Microscopic World II"},
            "questions": [{"id": "big", "question": stem}]
        }}
    });
    assert!(body.to_string().len() > 2 * 1024 * 1024);

    let resp = Client::new()
        .put(format!("{}/api/dataset", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let status: Value = resp.json().await.unwrap();
    assert_eq!(status["records"], 1);
}

#[tokio::test]
async fn test_put_dataset_rejects_non_object() {
    let (base, _dir) = spawn_app().await;
    let resp = Client::new()
        .put(format!("{}/api/dataset", base))
        .json(&json!([1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_reload_reads_questions_dir() {
    let (base, dir) = spawn_app().await;
    std::fs::write(
        dir.path().join("questions").join("Topic3.json"),
        dataset()["Topic3.json"]["content"].to_string(),
    )
    .unwrap();

    let client = Client::new();
    let status: Value = client
        .post(format!("{}/api/dataset/reload", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["records"], 1);

    let current: Value = client
        .get(format!("{}/api/dataset", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["fingerprint"], status["fingerprint"]);
    assert!(current["loadedAt"].is_string());
}

#[tokio::test]
async fn test_topics_and_stats() {
    let (base, _dir) = spawn_app().await;
    let client = Client::new();

    let stats: Value = client
        .get(format!("{}/api/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["state"], "uninitialized");
    assert_eq!(stats["matchThreshold"], 0.65);

    let topics: Value = client
        .get(format!("{}/api/topics", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(topics["total"], 2);
    assert_eq!(topics["topics"][0]["name"], "Metals");

    let stats: Value = client
        .get(format!("{}/api/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["state"], "ready");
    assert_eq!(stats["topics"], 2);
}
