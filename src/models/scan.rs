//! Scan request/response types.
//!
//! This module defines:
//! - `ScanRequest`: Request body for `POST /scan`
//! - `ScanResult`: Classification outcome returned by the CLI and the API

use super::label::Label;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Request body for scanning a message.
///
/// # JSON Example
///
/// ```json
/// {
///   "email_text": "Urgent: verify your bank account now"
/// }
/// ```
///
/// `email_text` is kept as a raw JSON value so that a missing field and a
/// non-string field can both be reported as a 400 by the handler.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub email_text: Option<serde_json::Value>,
}

impl ScanRequest {
    /// The message text, if present, a string, and not blank.
    pub fn text(&self) -> Option<&str> {
        self.email_text
            .as_ref()
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Classification outcome.
///
/// # JSON Example
///
/// ```json
/// {
///   "classification": "phishing",
///   "confidence": 0.9132,
///   "explanation": "The email exhibits characteristics ...",
///   "timestamp": "2025-12-21T19:00:00.123456+01:00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub classification: Label,

    /// Probability of the predicted class, rounded to 4 decimals
    pub confidence: f64,

    pub explanation: String,

    pub timestamp: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> ScanRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_text_accepts_non_blank_string() {
        assert_eq!(request(r#"{"email_text": "hi there"}"#).text(), Some("hi there"));
    }

    #[test]
    fn test_text_rejects_missing_blank_and_non_string() {
        assert_eq!(request(r#"{}"#).text(), None);
        assert_eq!(request(r#"{"not_email_text": "x"}"#).text(), None);
        assert_eq!(request(r#"{"email_text": "   "}"#).text(), None);
        assert_eq!(request(r#"{"email_text": 42}"#).text(), None);
        assert_eq!(request(r#"{"email_text": null}"#).text(), None);
    }
}
