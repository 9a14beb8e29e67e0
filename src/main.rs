//! Email Guard - Main Application Entry Point
//!
//! Classifies free-text email/SMS content as `legit`, `spam` or `phishing`.
//!
//! # Architecture
//!
//! - **Classifier**: TF-IDF features + one-vs-rest logistic regression, stored as JSON
//! - **CLI**: `classify`, `train` and `serve` subcommands (clap)
//! - **Web Framework**: Axum (async HTTP server)
//! - **Authentication**: shared bearer token, compared by SHA-256 digest
//!
//! # Startup Flow
//!
//! 1. Parse the command line and initialize logging
//! 2. Load configuration from environment variables (and `.env`)
//! 3. Dispatch to the selected subcommand

mod classifier;
mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod training;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    logging::init_logging(cli.verbosity());

    let config = config::Config::from_env()?;
    tracing::debug!(model_path = ?config.model_path, data_dir = ?config.data_dir, "Configuration loaded");

    cli::run(cli, config).await
}
