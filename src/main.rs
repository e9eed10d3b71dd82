//! LessonForge CLI.
//!
//! Thin wiring over the library: loads configuration, hydrates the membership
//! store, and runs one command.
//!
//! ```text
//! lessonforge status
//! lessonforge start-trial
//! lessonforge activate-premium [days]
//! lessonforge generate <subject> <grade> <lesson-file>
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use lessonforge::adapters::ai::{GeminiConfig, GeminiGenerator};
use lessonforge::adapters::clock::SystemClock;
use lessonforge::adapters::storage::FileMembershipStorage;
use lessonforge::application::{GenerationOrchestrator, MembershipStore};
use lessonforge::config::AppConfig;
use lessonforge::domain::generation::{GenerationRequest, Grade, Subject};
use lessonforge::domain::membership::{policy, MembershipSnapshot};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| format!("Configuration error: {}", e))?;
    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    let store = MembershipStore::new(
        Arc::new(FileMembershipStorage::new(config.storage.data_path())),
        Arc::new(SystemClock::new()),
        config.membership.clone(),
    );
    store
        .load()
        .await
        .map_err(|e| format!("Failed to load membership state: {}", e))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("status") | None => {
            print_status(&store.current_status().await);
            Ok(())
        }
        Some("start-trial") => {
            let snap = store
                .start_trial()
                .await
                .map_err(|e| format!("Failed to start trial: {}", e))?;
            print_status(&snap);
            Ok(())
        }
        Some("activate-premium") => {
            let days: u32 = match args.get(1) {
                Some(value) => value
                    .parse()
                    .map_err(|_| "Days must be a positive number".to_string())?,
                None => config.membership.premium_duration_days,
            };
            let snap = store
                .activate_premium(days)
                .await
                .map_err(|e| format!("Failed to activate premium: {}", e))?;
            print_status(&snap);
            Ok(())
        }
        Some("generate") => generate(&config, &store, &args[1..]).await,
        Some(other) => Err(format!(
            "Unknown command '{}'. Commands: status, start-trial, activate-premium, generate",
            other
        )),
    }
}

async fn generate(
    config: &AppConfig,
    store: &MembershipStore,
    args: &[String],
) -> Result<(), String> {
    let [subject, grade, path] = args else {
        return Err("Usage: lessonforge generate <subject> <grade> <lesson-file>".to_string());
    };

    let subject = parse_subject(subject)?;
    let grade = grade
        .parse::<u8>()
        .ok()
        .and_then(|g| Grade::new(g).ok())
        .ok_or("Grade must be between 1 and 12")?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read lesson file '{}': {}", path, e))?;

    let generator = GeminiGenerator::new(
        GeminiConfig::new(config.ai.gemini_api_key.clone().unwrap_or_default())
            .with_model(config.ai.model.as_str())
            .with_base_url(config.ai.base_url.as_str())
            .with_timeout(config.ai.timeout()),
    )
    .map_err(|e| format!("Failed to build generator: {}", e))?;

    let orchestrator = GenerationOrchestrator::new(Arc::new(generator));
    let request = GenerationRequest::new(subject, grade, content);

    match orchestrator.process(&request, store).await {
        Ok(lesson) => {
            println!("{}", lesson.text());
            Ok(())
        }
        Err(failure) => Err(failure.user_message()),
    }
}

fn parse_subject(value: &str) -> Result<Subject, String> {
    match value.to_lowercase().as_str() {
        "math" => Ok(Subject::Math),
        "literature" => Ok(Subject::Literature),
        "natural-science" => Ok(Subject::NaturalScience),
        "history-geography" => Ok(Subject::HistoryGeography),
        "english" => Ok(Subject::English),
        "informatics" => Ok(Subject::Informatics),
        "civic-education" => Ok(Subject::CivicEducation),
        other => Err(format!(
            "Unknown subject '{}'. Subjects: math, literature, natural-science, \
             history-geography, english, informatics, civic-education",
            other
        )),
    }
}

fn print_status(snapshot: &MembershipSnapshot) {
    println!("Membership: {:?}", snapshot.status);
    println!("Days remaining: {}", snapshot.days_remaining);
    println!("{}", policy::gating_action(snapshot).user_message());
}
