//! Train/test splitting.

use super::dataset::Sample;
use crate::models::label::Label;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
    pub stratified: bool,
}

/// Number of test samples for a dataset of `n` items.
fn test_count(n: usize, test_size: f64) -> usize {
    ((n as f64) * test_size).ceil() as usize
}

/// Split `samples` so that roughly `test_size` of them land in the test set.
///
/// Class proportions are preserved when every class has at least two samples
/// and both halves can hold one sample per class. Otherwise a plain shuffled
/// split is used and a warning is logged. With fewer than two samples
/// everything goes to training.
pub fn train_test_split(samples: Vec<Sample>, test_size: f64, seed: u64) -> Split {
    let n = samples.len();
    let n_test = test_count(n, test_size);
    if n < 2 || n_test == 0 || n_test >= n {
        return Split {
            train: samples,
            test: Vec::new(),
            stratified: false,
        };
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let mut by_class: BTreeMap<Label, Vec<Sample>> = BTreeMap::new();
    for sample in samples {
        by_class.entry(sample.label).or_default().push(sample);
    }

    let n_classes = by_class.len();
    let min_class = by_class.values().map(Vec::len).min().unwrap_or(0);
    if min_class >= 2 && n_test >= n_classes && n - n_test >= n_classes {
        return stratified(by_class, n, n_test, &mut rng);
    }

    tracing::warn!(
        smallest_class = min_class,
        classes = n_classes,
        test_samples = n_test,
        "Cannot stratify split; proceeding without stratification"
    );

    let mut all: Vec<Sample> = by_class.into_values().flatten().collect();
    all.shuffle(&mut rng);
    let train = all.split_off(n_test);
    Split {
        train,
        test: all,
        stratified: false,
    }
}

fn stratified(
    by_class: BTreeMap<Label, Vec<Sample>>,
    n: usize,
    n_test: usize,
    rng: &mut StdRng,
) -> Split {
    // Largest-remainder allocation of test slots, at least one per class and
    // never a whole class
    let mut quotas: Vec<(Label, usize, f64, usize)> = by_class
        .iter()
        .map(|(label, group)| {
            let exact = group.len() as f64 * n_test as f64 / n as f64;
            let base = (exact.floor() as usize).clamp(1, group.len() - 1);
            (*label, base, exact - exact.floor(), group.len())
        })
        .collect();

    let mut allocated: usize = quotas.iter().map(|q| q.1).sum();
    quotas.sort_by(|a, b| b.2.total_cmp(&a.2).then(a.0.cmp(&b.0)));

    // Raising small classes to one slot can overshoot; give slots back
    // starting from the smallest remainder
    while allocated > n_test {
        let Some(quota) = quotas.iter_mut().rev().find(|q| q.1 > 1) else {
            break;
        };
        quota.1 -= 1;
        allocated -= 1;
    }
    for quota in quotas.iter_mut() {
        if allocated >= n_test {
            break;
        }
        if quota.1 < quota.3 - 1 {
            quota.1 += 1;
            allocated += 1;
        }
    }
    let quota_of: BTreeMap<Label, usize> = quotas.iter().map(|q| (q.0, q.1)).collect();

    let mut train = Vec::new();
    let mut test = Vec::new();
    for (label, mut group) in by_class {
        group.shuffle(rng);
        let rest = group.split_off(quota_of[&label]);
        test.extend(group);
        train.extend(rest);
    }
    train.shuffle(rng);
    test.shuffle(rng);

    Split {
        train,
        test,
        stratified: true,
    }
}
