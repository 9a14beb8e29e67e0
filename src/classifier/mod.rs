//! Text classification pipeline.
//!
//! - `preprocess`: text normalization (case, punctuation, stop words, plurals)
//! - `vectorizer`: TF-IDF features
//! - `logistic`: one-vs-rest logistic regression
//! - `pipeline`: the two combined, plus JSON persistence
//! - `explain`: human-readable explanation of a prediction

pub mod explain;
pub mod logistic;
pub mod pipeline;
pub mod preprocess;
pub mod vectorizer;

pub use pipeline::Pipeline;
