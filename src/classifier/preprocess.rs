//! Text normalization applied before vectorization.
//!
//! Lowercases, strips ASCII punctuation and digit runs, removes English stop
//! words and reduces plural nouns to their singular form.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// English stop words (NLTK corpus).
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Irregular plurals that suffix rules would mangle.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("people", "people"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
];

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").expect("static regex");
    static ref STOP_WORD_SET: HashSet<&'static str> = STOP_WORDS.iter().copied().collect();
    static ref IRREGULAR: HashMap<&'static str, &'static str> =
        IRREGULAR_PLURALS.iter().copied().collect();
}

/// Normalize raw message text into a space-separated token string.
///
/// ```text
/// "Click HERE for FREE prizes!" -> "click free prize"
/// ```
pub fn preprocess_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_punct: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let without_digits = DIGITS.replace_all(&without_punct, "");

    without_digits
        .split_whitespace()
        .filter(|word| !STOP_WORD_SET.contains(*word))
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduce a (lowercase) noun to its singular form.
pub fn lemmatize(word: &str) -> String {
    if let Some(lemma) = IRREGULAR.get(word) {
        return (*lemma).to_string();
    }

    // Short words are left alone: "gas", "bus", "yes"
    if word.chars().count() < 4 {
        return word.to_string();
    }

    // "ties" and "lies" keep their "ie" and fall through to the -s rule
    if let Some(stem) = word.strip_suffix("ies").filter(|stem| stem.len() > 1) {
        return format!("{stem}y");
    }
    for suffix in ["sses", "ches", "shes", "xes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}
