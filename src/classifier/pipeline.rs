//! Vectorizer + classifier bundle and its on-disk format.

use super::logistic::{LogisticParams, LogisticRegression};
use super::vectorizer::TfidfVectorizer;
use crate::{error::ModelError, models::label::Label};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bumped whenever the serialized layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// A trained text classifier: raw text in, class probabilities out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    format_version: u32,
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl Pipeline {
    /// Fit the vectorizer on `texts`, then the classifier on the resulting vectors.
    pub fn fit<S: AsRef<str>>(
        texts: &[S],
        labels: &[Label],
        max_features: usize,
        params: LogisticParams,
    ) -> Result<Self, ModelError> {
        if texts.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let mut vectorizer = TfidfVectorizer::new(max_features);
        let rows = vectorizer.fit_transform(texts);
        tracing::debug!(
            samples = rows.len(),
            features = vectorizer.n_features(),
            "Vectorized training corpus"
        );

        let classifier =
            LogisticRegression::fit(&rows, labels, vectorizer.n_features(), params)?;

        Ok(Self {
            format_version: FORMAT_VERSION,
            vectorizer,
            classifier,
        })
    }

    pub fn classes(&self) -> &[Label] {
        self.classifier.classes()
    }

    pub fn predict_proba(&self, text: &str) -> Vec<f64> {
        self.classifier
            .predict_proba(&self.vectorizer.transform(text))
    }

    pub fn predict(&self, text: &str) -> (Label, f64) {
        self.classifier.predict(&self.vectorizer.transform(text))
    }

    /// Read a model written by [`Pipeline::save`].
    ///
    /// # Errors
    ///
    /// - `NotFound` if nothing exists at `path` (reported as an absolute path)
    /// - `Json` if the file is not a valid model
    /// - `UnsupportedVersion` if it was written by an incompatible version
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let absolute = absolute(path);
        if !absolute.exists() {
            return Err(ModelError::NotFound { path: absolute });
        }

        let bytes = fs::read(&absolute)?;
        let pipeline: Pipeline = serde_json::from_slice(&bytes)?;
        if pipeline.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: pipeline.format_version,
                expected: FORMAT_VERSION,
            });
        }

        tracing::info!(path = %absolute.display(), classes = ?pipeline.classes(), "Model loaded");
        Ok(pipeline)
    }

    /// Write the model as JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec(self)?)?;
        tracing::info!(path = %path.display(), "Model saved");
        Ok(())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
