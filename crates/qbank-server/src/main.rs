//! qbank — question-bank analysis server.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use qbank_core::{ParseResult, QbankConfig};
use qbank_runtime::QuestionAnalyzer;
use qbank_server::dataset_loader::load_dataset_dir;
use qbank_server::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("QBANK_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// Build an analyzer and seed it with the on-disk dataset.
fn build_analyzer(config: &QbankConfig) -> anyhow::Result<QuestionAnalyzer> {
    let analyzer = QuestionAnalyzer::from_config(config)?;
    match load_dataset_dir(&config.data_paths.questions) {
        Ok(cache) => {
            analyzer.set_dataset_from_cache(&cache);
        }
        Err(e) => warn!(
            "Could not read dataset directory {}: {}",
            config.data_paths.questions.display(),
            e
        ),
    }
    Ok(analyzer)
}

fn read_input(arg: &str) -> anyhow::Result<String> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(Path::new(arg))?)
}

fn print_summary(result: &ParseResult) {
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    println!("Source: {}", or_dash(result.source.clone()));
    println!("Year: {}", or_dash(result.year.map(|y| y.to_string())));
    println!("Question #: {}", or_dash(result.question_number.clone()));
    println!("Topic: {} - {}", result.topic_id, result.topic_name);
    println!("Question type: {}", or_dash(result.question_type.clone()));
    println!(
        "Detected answer: {} {}",
        or_dash(result.correct_option.clone()),
        result.correct_option_text.clone().unwrap_or_default()
    );
    println!(
        "Dataset similarity: {}",
        or_dash(result.match_confidence.map(|c| format!("{:.3}", c)))
    );
    if let Some(id) = &result.matched_dataset_id {
        println!("Matched record: {}", id);
    }
    println!();
    println!("Prompt:");
    println!("{}", result.prompt);
    if !result.answer_options.is_empty() {
        println!();
        println!("Options:");
        for opt in &result.answer_options {
            println!("  {}. {}", opt.label, opt.text);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let data_dir = resolve_data_dir();

    if args.len() > 1 {
        match args[1].as_str() {
            "analyze" | "--analyze" => {
                if args.len() < 3 {
                    eprintln!("Usage: qbank analyze <file|->");
                    std::process::exit(1);
                }
                let text = read_input(&args[2])?;
                let config = QbankConfig::from_env(&data_dir)?;
                let analyzer = build_analyzer(&config)?;
                match analyzer.analyze(&text).await {
                    Ok(result) => {
                        print_summary(&result);
                        return Ok(());
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--help" | "-h" | "help" => {
                println!("qbank — question-bank parsing and dataset matching");
                println!();
                println!("Usage: qbank [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  analyze <file|->         Analyze one pasted question and print a summary");
                println!("  help                     Show this help message");
                println!();
                println!("Environment: QBANK_DATA_DIR, PORT, QBANK_TOPICS_URL,");
                println!("             QBANK_TOPICS_TIMEOUT_SECS, QBANK_MATCH_THRESHOLD");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'qbank help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    info!("Data directory: {}", data_dir.display());

    let config = QbankConfig::from_env(&data_dir)?;
    let port = config.port;
    let analyzer = build_analyzer(&config)?;
    let state = Arc::new(AppState::new(config, analyzer));

    // start the topic fetch in the background
    let warm = state.clone();
    tokio::spawn(async move {
        warm.analyzer.ensure_topics_loaded().await;
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("qbank server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
