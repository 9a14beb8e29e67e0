//! Shared application state injected into handlers and middleware.

use crate::services::{classification_service::EmailGuard, history_service::ScanHistory};
use sha2::{Digest, Sha256};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` when the model failed to load at startup
    pub guard: Option<Arc<EmailGuard>>,

    pub history: Arc<ScanHistory>,

    /// SHA-256 (hex) of the configured API key; `None` disables authentication
    pub api_key_hash: Option<String>,
}

impl AppState {
    pub fn new(guard: Option<EmailGuard>, history_limit: usize, api_key: Option<&str>) -> Self {
        Self {
            guard: guard.map(Arc::new),
            history: Arc::new(ScanHistory::new(history_limit)),
            api_key_hash: api_key.map(hash_key),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.guard.is_some()
    }
}

/// Hex-encoded SHA-256 of an API key.
pub fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
