//! Scan history models.

use super::label::Label;
use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

/// Maximum number of characters of the scanned text kept in history.
pub const SNIPPET_CHARS: usize = 100;

/// One entry of the scan history.
///
/// Only a snippet of the scanned text is retained.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub id: Uuid,
    pub text_snippet: String,
    pub classification: Label,
    pub confidence: f64,
    pub timestamp: DateTime<Local>,
}

impl ScanRecord {
    pub fn new(text: &str, classification: Label, confidence: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            text_snippet: snippet(text),
            classification,
            confidence,
            timestamp: Local::now(),
        }
    }
}

/// Response body for `GET /history`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<ScanRecord>,
}

/// First [`SNIPPET_CHARS`] characters of `text`, with `...` appended when truncated.
pub fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_kept_whole() {
        assert_eq!(snippet("hello"), "hello");
        let exact = "a".repeat(SNIPPET_CHARS);
        assert_eq!(snippet(&exact), exact);
    }

    #[test]
    fn test_long_text_truncated() {
        let long = "b".repeat(SNIPPET_CHARS + 1);
        let s = snippet(&long);
        assert_eq!(s, format!("{}...", "b".repeat(SNIPPET_CHARS)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "é".repeat(SNIPPET_CHARS + 5);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 3);
    }
}
