//! One-vs-rest L2-regularized logistic regression over sparse features.
//!
//! Each class gets its own binary model (class vs. everything else) trained
//! with Nesterov-accelerated gradient descent. Sample weights are balanced so
//! rare classes count as much as common ones. The intercept is regularized
//! together with the weights.

use super::vectorizer::SparseVector;
use crate::{error::ModelError, models::label::Label};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Training hyper-parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Inverse regularization strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the gradient norm drops below this
    pub tol: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// Binary model for one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BinaryModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl BinaryModel {
    fn decision(&self, x: &SparseVector) -> f64 {
        x.iter()
            .filter_map(|&(i, v)| self.weights.get(i).map(|w| w * v))
            .sum::<f64>()
            + self.intercept
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    params: LogisticParams,
    classes: Vec<Label>,
    models: Vec<BinaryModel>,
}

impl LogisticRegression {
    /// Fit one binary model per distinct label.
    ///
    /// `n_features` is the dimensionality of the sparse rows.
    pub fn fit(
        rows: &[SparseVector],
        labels: &[Label],
        n_features: usize,
        params: LogisticParams,
    ) -> Result<Self, ModelError> {
        if rows.len() != labels.len() {
            return Err(ModelError::LabelMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
        for label in labels {
            *counts.entry(*label).or_default() += 1;
        }
        let classes: Vec<Label> = counts.keys().copied().collect();

        // A single class needs no decision boundary
        if classes.len() == 1 {
            return Ok(Self {
                params,
                classes,
                models: Vec::new(),
            });
        }

        let n = rows.len() as f64;
        let k = classes.len() as f64;
        let sample_weights: Vec<f64> = labels
            .iter()
            .map(|label| n / (k * counts[label] as f64))
            .collect();

        let models = classes
            .iter()
            .map(|class| {
                let targets: Vec<f64> = labels
                    .iter()
                    .map(|l| if l == class { 1.0 } else { -1.0 })
                    .collect();
                let model = fit_binary(rows, &targets, &sample_weights, n_features, params);
                tracing::debug!(class = %class, "Fitted one-vs-rest model");
                model
            })
            .collect();

        Ok(Self {
            params,
            classes,
            models,
        })
    }

    /// Sorted class labels; index `i` matches `predict_proba()[i]`.
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Class probabilities, summing to 1.
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        if self.models.is_empty() {
            return vec![1.0; self.classes.len()];
        }

        let scores: Vec<f64> = self
            .models
            .iter()
            .map(|m| sigmoid(m.decision(x)))
            .collect();
        let total: f64 = scores.iter().sum();
        if total > 0.0 {
            scores.iter().map(|s| s / total).collect()
        } else {
            vec![1.0 / scores.len() as f64; scores.len()]
        }
    }

    /// Most probable class and its probability.
    pub fn predict(&self, x: &SparseVector) -> (Label, f64) {
        let proba = self.predict_proba(x);
        argmax(&proba)
            .map(|i| (self.classes[i], proba[i]))
            .unwrap_or((Label::InvalidInput, 0.0))
    }
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Minimize `0.5·|θ|² + C·Σ sᵢ·log(1 + exp(-yᵢ·θ·x̃ᵢ))` where `x̃ = [x, 1]`.
///
/// The objective is divided by `Σ sᵢ` to keep the step size independent of
/// the dataset size. Rows are L2-normalised, so `|x̃|² ≤ 2` and the gradient
/// is Lipschitz with constant `1/Σsᵢ + C/2`.
fn fit_binary(
    rows: &[SparseVector],
    targets: &[f64],
    sample_weights: &[f64],
    n_features: usize,
    params: LogisticParams,
) -> BinaryModel {
    let dim = n_features + 1;
    let total_weight: f64 = sample_weights.iter().sum();
    let lipschitz = 1.0 / total_weight + params.c * 0.5;
    let step = 1.0 / lipschitz;

    let mut theta = vec![0.0; dim];
    let mut lookahead = theta.clone();
    let mut grad = vec![0.0; dim];

    for iter in 0..params.max_iter {
        gradient(&lookahead, rows, targets, sample_weights, params.c, total_weight, &mut grad);

        let grad_norm = grad.iter().map(|g| g * g).sum::<f64>().sqrt();
        if grad_norm < params.tol {
            theta.copy_from_slice(&lookahead);
            tracing::trace!(iter, grad_norm, "Converged");
            break;
        }

        let momentum = iter as f64 / (iter as f64 + 3.0);
        for j in 0..dim {
            let next = lookahead[j] - step * grad[j];
            lookahead[j] = next + momentum * (next - theta[j]);
            theta[j] = next;
        }
    }

    let intercept = theta[n_features];
    theta.truncate(n_features);
    BinaryModel {
        weights: theta,
        intercept,
    }
}

fn gradient(
    theta: &[f64],
    rows: &[SparseVector],
    targets: &[f64],
    sample_weights: &[f64],
    c: f64,
    total_weight: f64,
    grad: &mut [f64],
) {
    let bias = theta.len() - 1;
    grad.copy_from_slice(theta);

    for ((x, &y), &s) in rows.iter().zip(targets).zip(sample_weights) {
        let z = x.iter().map(|&(i, v)| theta[i] * v).sum::<f64>() + theta[bias];
        let coeff = -y * s * c * sigmoid(-y * z);
        for &(i, v) in x {
            grad[i] += coeff * v;
        }
        grad[bias] += coeff;
    }

    for g in grad.iter_mut() {
        *g /= total_weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_hot(i: usize) -> SparseVector {
        vec![(i, 1.0)]
    }

    #[test]
    fn test_fit_rejects_empty_and_mismatched() {
        let err = LogisticRegression::fit(&[], &[], 3, LogisticParams::default()).unwrap_err();
        assert!(matches!(err, ModelError::EmptyTrainingSet));

        let err = LogisticRegression::fit(&[one_hot(0)], &[], 3, LogisticParams::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::LabelMismatch { rows: 1, labels: 0 }));
    }

    #[test]
    fn test_separable_classes_are_learned() {
        // Feature 0 marks spam, feature 1 phishing, feature 2 legit
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for _ in 0..5 {
            rows.push(one_hot(0));
            labels.push(Label::Spam);
            rows.push(one_hot(1));
            labels.push(Label::Phishing);
            rows.push(one_hot(2));
            labels.push(Label::Legit);
        }

        let model =
            LogisticRegression::fit(&rows, &labels, 3, LogisticParams::default()).unwrap();
        assert_eq!(model.classes(), &[Label::Legit, Label::Phishing, Label::Spam]);

        assert_eq!(model.predict(&one_hot(0)).0, Label::Spam);
        assert_eq!(model.predict(&one_hot(1)).0, Label::Phishing);
        assert_eq!(model.predict(&one_hot(2)).0, Label::Legit);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let rows = vec![one_hot(0), one_hot(1), one_hot(0), one_hot(1)];
        let labels = vec![Label::Spam, Label::Legit, Label::Spam, Label::Legit];
        let model =
            LogisticRegression::fit(&rows, &labels, 2, LogisticParams::default()).unwrap();

        for x in [one_hot(0), one_hot(1), Vec::new()] {
            let proba = model.predict_proba(&x);
            assert_eq!(proba.len(), 2);
            assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn test_single_class_predicts_it_with_certainty() {
        let rows = vec![one_hot(0), one_hot(1)];
        let labels = vec![Label::Legit, Label::Legit];
        let model =
            LogisticRegression::fit(&rows, &labels, 2, LogisticParams::default()).unwrap();

        assert_eq!(model.predict(&one_hot(1)), (Label::Legit, 1.0));
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), Some(1));
        assert_eq!(argmax(&[]), None);
    }
}
