//! Scan history endpoint.

use crate::{models::history::HistoryResponse, state::AppState};
use axum::{Json, extract::State};

/// List recent scans, newest first.
///
/// # Endpoint
///
/// `GET /history`
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "history": [
///     {
///       "id": "550e8400-e29b-41d4-a716-446655440000",
///       "text_snippet": "Urgent: verify your account...",
///       "classification": "phishing",
///       "confidence": 0.8731,
///       "timestamp": "2025-12-21T19:00:00.123456+01:00"
///     }
///   ]
/// }
/// ```
pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: state.history.snapshot(),
    })
}
