//! Message scanning endpoint.
//!
//! - POST /scan - Classify a message and record it in the history

use crate::{
    error::AppError,
    models::{
        history::ScanRecord,
        scan::{ScanRequest, ScanResult},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

/// Classify a message.
///
/// # Request Body
///
/// ```json
/// {
///   "email_text": "Your account is suspended, verify now: bank.example/login"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the `ScanResult`
/// - **Error (400)**: Body missing/malformed, or `email_text` missing, not a string, or blank
/// - **Error (401)**: Invalid API key
/// - **Error (500)**: No model loaded
pub async fn scan_email(
    State(state): State<AppState>,
    body: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResult>, AppError> {
    let guard = state.guard.as_ref().ok_or(AppError::ModelNotLoaded)?;

    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected scan body");
        AppError::InvalidRequest("Invalid request: JSON body is missing or malformed.".to_string())
    })?;

    let text = request.text().ok_or_else(|| {
        AppError::InvalidRequest(
            "Invalid input. 'email_text' is required and must be a non-empty string.".to_string(),
        )
    })?;

    let result = guard.classify(text);
    state
        .history
        .record(ScanRecord::new(text, result.classification, result.confidence));

    tracing::info!(
        classification = %result.classification,
        confidence = result.confidence,
        "Scanned message"
    );

    Ok(Json(result))
}
