//! Building a model from labelled datasets.
//!
//! - `dataset`: reading the supported dataset files
//! - `split`: train/test split
//! - `metrics`: evaluation report

pub mod dataset;
pub mod metrics;
pub mod split;
