//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `API_KEY` (optional): shared bearer secret. When unset the API is unprotected.
/// - `MODEL_PATH` (optional): trained model file, defaults to `model/email_guard_model.json`
/// - `SERVER_HOST` (optional): bind address, defaults to `0.0.0.0`
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 5000
/// - `HISTORY_LIMIT` (optional): scan history capacity, defaults to 100
/// - `DATA_DIR` (optional): training datasets directory, defaults to `data`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    #[serde(default = "default_host")]
    pub server_host: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model/email_guard_model.json")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

fn default_history_limit() -> usize {
    100
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into
    /// expected types (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Build a configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = envy::from_iter::<_, Config>(vars)?;

        // An empty API_KEY= line in .env means "no key", not "the empty key"
        if config.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            config.api_key = None;
        }

        Ok(config)
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
