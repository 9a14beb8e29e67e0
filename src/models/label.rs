//! Classification labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of classifying a message.
///
/// Variant order is alphabetical so that sorted label sets match the order
/// the classifier stores its per-class weights in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Legit,
    Phishing,
    Spam,
    /// Returned for empty input; never produced by a trained model.
    InvalidInput,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Legit => "legit",
            Label::Phishing => "phishing",
            Label::Spam => "spam",
            Label::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
