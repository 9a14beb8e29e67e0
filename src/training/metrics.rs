//! Evaluation metrics for a trained classifier.

use crate::models::label::Label;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct ClassMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class and aggregate scores. Undefined ratios count as zero.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub weighted_precision: f64,
    pub weighted_recall: f64,
    pub weighted_f1: f64,
    pub support: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Score `predicted` against `actual`. Labels seen in either are reported.
    pub fn compute(actual: &[Label], predicted: &[Label]) -> Self {
        let labels: BTreeSet<Label> = actual.iter().chain(predicted).copied().collect();
        let pairs: Vec<(Label, Label)> = actual.iter().copied().zip(predicted.iter().copied()).collect();

        let classes: Vec<ClassMetrics> = labels
            .into_iter()
            .map(|label| {
                let tp = pairs.iter().filter(|(a, p)| *a == label && *p == label).count();
                let predicted_pos = pairs.iter().filter(|(_, p)| *p == label).count();
                let support = pairs.iter().filter(|(a, _)| *a == label).count();
                let precision = ratio(tp, predicted_pos);
                let recall = ratio(tp, support);
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1: f1(precision, recall),
                    support,
                }
            })
            .collect();

        let total = pairs.len();
        let correct = pairs.iter().filter(|(a, p)| a == p).count();
        let weighted = |metric: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|c| metric(c) * c.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };

        Self {
            accuracy: ratio(correct, total),
            weighted_precision: weighted(|c| c.precision),
            weighted_recall: weighted(|c| c.recall),
            weighted_f1: weighted(|c| c.f1),
            support: total,
            classes,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>14} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label.as_str(),
                c.precision,
                c.recall,
                c.f1,
                c.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:>14} {:>9} {:>9} {:>9.2} {:>9}", "accuracy", "", "", self.accuracy, self.support)?;
        writeln!(
            f,
            "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            "weighted avg", self.weighted_precision, self.weighted_recall, self.weighted_f1, self.support
        )
    }
}
