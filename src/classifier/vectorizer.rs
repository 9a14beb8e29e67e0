//! TF-IDF feature extraction.
//!
//! Documents are run through [`preprocess_text`], tokenized into words of at
//! least two characters, and mapped onto a fixed vocabulary learned at fit
//! time. Vectors are sparse and L2-normalised.

use super::preprocess::preprocess_text;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").expect("static regex");
}

/// Sparse feature vector: `(feature index, value)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Learned TF-IDF vocabulary and inverse document frequencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Number of features (vocabulary size) after fitting.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Learn the vocabulary and idf weights from a corpus.
    pub fn fit<S: AsRef<str>>(&mut self, docs: &[S]) {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                *term_freq.entry(token.as_str()).or_default() += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_default() += 1;
                }
            }
        }

        // Keep the most frequent terms; ties resolved alphabetically
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let kept: BTreeMap<&str, usize> = ranked
            .into_iter()
            .map(|(term, _)| (term, doc_freq[term]))
            .collect();

        let n_docs = docs.len() as f64;
        self.vocabulary = kept
            .keys()
            .enumerate()
            .map(|(index, term)| ((*term).to_string(), index))
            .collect();
        self.idf = kept
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
    }

    /// Map one document into the learned feature space.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(doc) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut vector {
                *value /= norm;
            }
        }

        vector
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, docs: &[S]) -> Vec<SparseVector> {
        self.fit(docs);
        docs.iter().map(|d| self.transform(d.as_ref())).collect()
    }
}

fn tokenize(doc: &str) -> Vec<String> {
    let cleaned = preprocess_text(doc);
    TOKEN
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let mut v = TfidfVectorizer::default();
        v.fit(&["zebra apple", "apple mango"]);

        assert_eq!(v.n_features(), 3);
        assert_eq!(v.vocabulary["apple"], 0);
        assert_eq!(v.vocabulary["mango"], 1);
        assert_eq!(v.vocabulary["zebra"], 2);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut v = TfidfVectorizer::new(2);
        v.fit(&["apple apple banana", "apple cherry banana", "durian"]);

        assert_eq!(v.n_features(), 2);
        assert!(v.vocabulary.contains_key("apple"));
        assert!(v.vocabulary.contains_key("banana"));
        assert!(!v.vocabulary.contains_key("cherry"));
    }

    #[test]
    fn test_frequency_ties_at_cutoff_break_alphabetically() {
        let mut v = TfidfVectorizer::new(1);
        v.fit(&["pear apple"]);

        assert_eq!(v.n_features(), 1);
        assert_eq!(v.vocabulary["apple"], 0);
        assert!(!v.vocabulary.contains_key("pear"));
    }

    #[test]
    fn test_smoothed_idf() {
        let mut v = TfidfVectorizer::default();
        v.fit(&["apple banana", "apple"]);

        // apple: df = 2, n = 2 -> ln(3/3) + 1 = 1
        let apple = v.vocabulary["apple"];
        assert!((v.idf[apple] - 1.0).abs() < 1e-12);
        // banana: df = 1 -> ln(3/2) + 1
        let banana = v.vocabulary["banana"];
        assert!((v.idf[banana] - ((1.5f64).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_l2_normalised() {
        let mut v = TfidfVectorizer::default();
        v.fit(&["cheap meds online", "meeting agenda attached"]);

        let x = v.transform("cheap cheap meds");
        let norm: f64 = x.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(x.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_unknown_terms_yield_empty_vector() {
        let mut v = TfidfVectorizer::default();
        v.fit(&["meeting agenda"]);

        assert!(v.transform("completely unseen words").is_empty());
        assert!(v.transform("").is_empty());
    }

    #[test]
    fn test_single_character_tokens_ignored() {
        let mut v = TfidfVectorizer::default();
        v.fit(&["x ray b plan"]);

        assert!(!v.vocabulary.contains_key("x"));
        assert!(!v.vocabulary.contains_key("b"));
        assert!(v.vocabulary.contains_key("ray"));
    }
}
