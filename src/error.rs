//! Error types and HTTP error response handling.
//!
//! This module defines the model-layer errors (loading, saving and training
//! a classifier) and the HTTP-layer errors, plus how the latter are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::path::PathBuf;

/// Errors raised while building, persisting or loading a classification model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// No model file exists at the given path.
    #[error("Model file not found at {}.", path.display())]
    NotFound { path: PathBuf },

    /// The model file was written by an incompatible version.
    #[error("Unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Training was requested without any samples.
    #[error("No data available for training")]
    EmptyTrainingSet,

    /// Training rows and labels disagree in length.
    #[error("Training set has {rows} rows but {labels} labels")]
    LabelMismatch { rows: usize, labels: usize },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A dataset file could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A dataset file is missing a required column.
    #[error("Dataset {} is missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// Application-wide HTTP error type.
///
/// Each variant maps to a specific HTTP status code and error message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bearer token is missing, malformed or wrong.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized. Please provide a valid API Key.")]
    Unauthorized,

    /// The server started without a usable model.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("AI model not loaded. Please check server logs and ensure model file exists.")]
    ModelNotLoaded,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Classification failed unexpectedly.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 Unauthorized
/// - `InvalidRequest` → 400 Bad Request
/// - `ModelNotLoaded` → 500 Internal Server Error
/// - `Model` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string())
            }
            AppError::ModelNotLoaded => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "model_not_loaded",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Model(ref err) => {
                tracing::error!(error = %err, "Error during email scan");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred during scanning".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidRequest("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ModelNotLoaded.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ModelError::EmptyTrainingSet)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_names_path() {
        let err = ModelError::NotFound {
            path: PathBuf::from("/models/missing.json"),
        };
        assert_eq!(err.to_string(), "Model file not found at /models/missing.json.");
    }
}
