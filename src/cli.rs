//! Command-line interface for the `email-guard` binary.

use crate::{
    config::Config,
    error::ModelError,
    logging::Verbosity,
    routes::build_router,
    services::{
        classification_service::EmailGuard,
        training_service::{self, TrainingOptions},
    },
    state::AppState,
};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

/// email-guard - spam and phishing detection for email and SMS text
#[derive(Debug, Parser)]
#[command(name = "email-guard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a single message and print the result as JSON
    Classify(ClassifyArgs),

    /// Train a model from the datasets in the data directory
    Train(TrainArgs),

    /// Run the HTTP API
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// The raw message text to classify
    pub email_text: String,

    /// Path to the trained model (overrides MODEL_PATH)
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Directory holding the datasets (overrides DATA_DIR)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Where to write the model (overrides MODEL_PATH)
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum vocabulary size
    #[arg(long, default_value_t = crate::classifier::vectorizer::DEFAULT_MAX_FEATURES)]
    pub max_features: usize,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to the trained model (overrides MODEL_PATH)
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Port to listen on (overrides SERVER_PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Classify(args) => Ok(classify(&args, &config)),
        Command::Train(args) => train(&args, &config),
        Command::Serve(args) => serve(&args, config).await,
    }
}

/// Print the classification to stdout, or an error document to stderr.
fn classify(args: &ClassifyArgs, config: &Config) -> ExitCode {
    match classify_json(args, config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(output) => {
            eprintln!("{output}");
            ExitCode::FAILURE
        }
    }
}

/// Pretty JSON for stdout on success, pretty JSON for stderr on failure.
fn classify_json(args: &ClassifyArgs, config: &Config) -> Result<String, String> {
    let model_path = args.model.as_ref().unwrap_or(&config.model_path);

    let guard = EmailGuard::load(model_path).map_err(|err| {
        let body = match err {
            ModelError::NotFound { .. } => json!({
                "error": err.to_string(),
                "suggestion": "Ensure the model file exists at the specified path. Run 'email-guard train' to generate it.",
            }),
            other => json!({
                "error": format!("An unexpected error occurred: {other}"),
            }),
        };
        pretty(&body)
    })?;

    let result = guard.classify(&args.email_text);
    serde_json::to_string_pretty(&result).map_err(|err| {
        pretty(&json!({ "error": format!("An unexpected error occurred: {err}") }))
    })
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn train(args: &TrainArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let mut options = TrainingOptions::new(
        args.data_dir.clone().unwrap_or_else(|| config.data_dir.clone()),
        args.output.clone().unwrap_or_else(|| config.model_path.clone()),
    );
    options.max_features = args.max_features;

    let outcome = training_service::train_and_save(&options)?;

    if outcome.used_seed_corpus {
        println!("No datasets found in {}; trained on the built-in seed corpus.", options.data_dir.display());
    }
    println!("Label distribution:");
    for (label, count) in &outcome.label_counts {
        println!("  {label:<10} {count}");
    }
    println!();
    println!(
        "Classification report ({} training / {} test samples):",
        outcome.train_size, outcome.test_size
    );
    println!("{}", outcome.report);
    println!("Model saved to {}", options.output.display());

    Ok(ExitCode::SUCCESS)
}

async fn serve(args: &ServeArgs, mut config: Config) -> anyhow::Result<ExitCode> {
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    // The API stays up without a model; /scan reports it as unavailable
    let guard = match EmailGuard::load(&config.model_path) {
        Ok(guard) => Some(guard),
        Err(err) => {
            tracing::error!(error = %err, "Error loading AI model");
            tracing::warn!("Run 'email-guard train' to generate a model if it is missing");
            None
        }
    };

    if config.api_key.is_none() {
        tracing::warn!("API_KEY environment variable not set. API access will not be protected");
    }

    let state = AppState::new(guard, config.history_limit, config.api_key.as_deref());
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Pipeline, logistic::LogisticParams};
    use crate::models::label::Label;
    use crate::services::training_service::seed_corpus;
    use clap::CommandFactory;
    use std::fs;
    use uuid::Uuid;

    fn config() -> Config {
        Config::from_vars(Vec::new()).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::try_parse_from(["email-guard", "-v", "classify", "hello", "--model", "m.json"])
            .unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
        match cli.command {
            Command::Classify(args) => {
                assert_eq!(args.email_text, "hello");
                assert_eq!(args.model, Some(PathBuf::from("m.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_train_defaults() {
        let cli = Cli::try_parse_from(["email-guard", "train"]).unwrap();
        match cli.command {
            Command::Train(args) => {
                assert!(args.data_dir.is_none());
                assert_eq!(args.max_features, 5000);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_classify_requires_text() {
        assert!(Cli::try_parse_from(["email-guard", "classify"]).is_err());
    }

    #[test]
    fn test_classify_missing_model_reports_error_and_suggestion() {
        let args = ClassifyArgs {
            email_text: "dummy text".to_string(),
            model: Some(PathBuf::from("/non/existent/path/model.json")),
        };

        let err = classify_json(&args, &config()).unwrap_err();
        let body: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert!(body["error"].as_str().unwrap().contains("Model file not found"));
        assert!(body["suggestion"].as_str().unwrap().contains("email-guard train"));
        assert!(body.get("classification").is_none());
    }

    #[test]
    fn test_classify_corrupt_model_is_unexpected_error() {
        let path = std::env::temp_dir().join(format!("email-guard-{}.json", Uuid::new_v4()));
        fs::write(&path, "{}").unwrap();
        let args = ClassifyArgs {
            email_text: "dummy text".to_string(),
            model: Some(path.clone()),
        };

        let err = classify_json(&args, &config()).unwrap_err();
        let body: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("An unexpected error occurred"));
        assert!(body.get("suggestion").is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_classify_success_prints_result_json() {
        let (texts, labels): (Vec<&str>, Vec<Label>) = seed_corpus().into_iter().unzip();
        let pipeline = Pipeline::fit(&texts, &labels, 5000, LogisticParams::default()).unwrap();
        let path = std::env::temp_dir().join(format!("email-guard-{}.json", Uuid::new_v4()));
        pipeline.save(&path).unwrap();

        let args = ClassifyArgs {
            email_text: "This is a test email for CLI.".to_string(),
            model: Some(path.clone()),
        };
        let out = classify_json(&args, &config()).unwrap();
        let body: serde_json::Value = serde_json::from_str(&out).unwrap();

        let label = body["classification"].as_str().unwrap();
        assert!(["legit", "spam", "phishing"].contains(&label));
        assert!(body["confidence"].is_number());
        assert!(body["explanation"].is_string());

        let _ = fs::remove_file(&path);
    }
}
