//! Human-readable explanations for a classification.

use crate::models::label::Label;

const LINK_MARKERS: &[&str] = &["link", "http", "https"];

const SECURITY_KEYWORDS: &[&str] = &[
    "verify",
    "account",
    "urgent",
    "security",
    "password",
    "bank",
    "update information",
    "suspended",
    "action required",
    "invoice",
    "payment",
    "reset password",
];

const SPAM_TERMS: &[&str] = &[
    "free",
    "won",
    "prize",
    "congratulations",
    "guarantee",
    "discount",
    "offer",
];

/// Below this confidence the result is called uncertain.
pub const LOW_CONFIDENCE: f64 = 0.5;
/// Below this confidence manual review is suggested.
pub const MODERATE_CONFIDENCE: f64 = 0.7;

fn base_explanation(label: Label) -> &'static str {
    match label {
        Label::Phishing => {
            "The email exhibits characteristics commonly found in phishing attempts, such as urgent requests for personal information, suspicious links, or unusual sender addresses. Exercise extreme caution."
        }
        Label::Spam => {
            "This email is likely unsolicited or promotional, containing common spam indicators like excessive marketing language, irrelevant content, or a high volume of similar messages. Consider blocking the sender."
        }
        Label::Legit => {
            "This email appears to be legitimate based on its content and structure. However, always double-check sender details and links, especially if it's unexpected or asks for sensitive information."
        }
        Label::InvalidInput => "Unable to provide a detailed explanation for this classification.",
    }
}

/// Build the explanation for `label` predicted on `text` with `confidence`.
pub fn explain(text: &str, label: Label, confidence: f64) -> String {
    let lower = text.to_lowercase();
    let mentions = |terms: &[&str]| terms.iter().any(|t| lower.contains(t));

    let mut explanation = base_explanation(label).to_string();

    if mentions(LINK_MARKERS) {
        explanation.push_str(
            " The presence of links is noted; always hover over links before clicking to verify their destination.",
        );
    }

    if mentions(SECURITY_KEYWORDS) {
        explanation.push_str(
            " Keywords related to account verification or security were detected, which are common in phishing attempts.",
        );
    }

    if label == Label::Spam && mentions(SPAM_TERMS) {
        explanation.push_str(" Common spam terms like 'free', 'won', or 'prize' were identified.");
    }

    let percent = confidence * 100.0;
    if confidence < LOW_CONFIDENCE {
        explanation.push_str(&format!(
            " (Confidence: {percent:.2}% is low, the classification might be uncertain.)"
        ));
    } else if confidence < MODERATE_CONFIDENCE {
        explanation.push_str(&format!(
            " (Confidence: {percent:.2}% is moderate, further manual review is recommended.)"
        ));
    }

    explanation
}
