//! Classification service - turns raw message text into a `ScanResult`.
//!
//! A single `EmailGuard` is built at startup and shared (behind an `Arc`)
//! by the CLI and all HTTP handlers.

use crate::{
    classifier::{Pipeline, explain::explain, logistic::argmax},
    error::ModelError,
    models::{label::Label, scan::ScanResult},
};
use chrono::Local;
use std::path::Path;

/// Explanation returned for empty input.
pub const INVALID_INPUT_EXPLANATION: &str = "Input must be a non-empty string.";

#[derive(Debug)]
pub struct EmailGuard {
    pipeline: Pipeline,
}

impl EmailGuard {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Load the model stored at `path`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no file at `path`
    /// - `Json` / `UnsupportedVersion`: the file is not a usable model
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Pipeline::load(path).map(Self::new)
    }

    /// Classify one message.
    ///
    /// Blank input is not an error: it yields `invalid_input` with zero
    /// confidence. Otherwise the most probable class is returned with its
    /// probability rounded to 4 decimals.
    pub fn classify(&self, text: &str) -> ScanResult {
        if text.trim().is_empty() {
            return ScanResult {
                classification: Label::InvalidInput,
                confidence: 0.0,
                explanation: INVALID_INPUT_EXPLANATION.to_string(),
                timestamp: Local::now(),
            };
        }

        let proba = self.pipeline.predict_proba(text);
        let Some(best) = argmax(&proba) else {
            return ScanResult {
                classification: Label::InvalidInput,
                confidence: 0.0,
                explanation: explain(text, Label::InvalidInput, 0.0),
                timestamp: Local::now(),
            };
        };
        let (label, confidence) = (self.pipeline.classes()[best], proba[best]);
        tracing::debug!(classification = %label, confidence, "Classified message");

        ScanResult {
            classification: label,
            confidence: round4(confidence),
            explanation: explain(text, label, confidence),
            timestamp: Local::now(),
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::training_service::seed_corpus;
    use crate::classifier::logistic::LogisticParams;

    /// Guard trained on the built-in seed corpus.
    pub(crate) fn seed_guard() -> EmailGuard {
        let (texts, labels): (Vec<&str>, Vec<Label>) = seed_corpus().into_iter().unzip();
        let pipeline = Pipeline::fit(&texts, &labels, 5000, LogisticParams::default()).unwrap();
        EmailGuard::new(pipeline)
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let guard = seed_guard();
        for text in ["", "   ", "\n\t"] {
            let result = guard.classify(text);
            assert_eq!(result.classification, Label::InvalidInput);
            assert_eq!(result.confidence, 0.0);
            assert!(result.explanation.contains("Input must be a non-empty string."));
        }
    }

    #[test]
    fn test_classifies_into_known_labels() {
        let guard = seed_guard();
        let samples = [
            "Hi John, confirming our meeting tomorrow at 10 AM regarding the project.",
            "Congratulations! You've won a FREE iPhone! Click here to claim: win.example.com",
            "Urgent action required for your bank account. Log in immediately to verify your details: secure-bank.ru/login",
        ];

        for text in samples {
            let result = guard.classify(text);
            assert!(matches!(
                result.classification,
                Label::Legit | Label::Spam | Label::Phishing
            ));
            assert!((0.0..=1.0).contains(&result.confidence));
            assert!(!result.explanation.is_empty());
        }
    }

    #[test]
    fn test_confidence_rounded_to_four_places() {
        let guard = seed_guard();
        let result = guard.classify("Exclusive offer: get rich quick");
        assert_eq!(result.confidence, round4(result.confidence));
    }

    #[test]
    fn test_text_with_no_known_words_still_classifies() {
        let guard = seed_guard();
        let result = guard.classify("zzzz qqqq");
        assert_ne!(result.classification, Label::InvalidInput);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(1.0), 1.0);
    }
}
