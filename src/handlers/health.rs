//! Health check endpoint for service monitoring.

use crate::state::AppState;
use axum::{Json, extract::State};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,

    /// Whether `/scan` can serve requests
    pub model_loaded: bool,
}

/// Health check handler. Public: no API key required.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "Email Guardian Backend is running",
///   "model_loaded": true
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Email Guardian Backend is running".to_string(),
        model_loaded: state.model_loaded(),
    })
}
