//! Training service - builds, evaluates and saves a model.
//!
//! # Process
//!
//! 1. Load every dataset found in the data directory
//! 2. Deduplicate by text and shuffle (fixed seed)
//! 3. Fall back to a small built-in corpus when nothing was loaded
//! 4. Split 80/20, stratified when possible
//! 5. Fit TF-IDF + logistic regression on the training half
//! 6. Evaluate on the test half and save the model

use crate::{
    classifier::{
        Pipeline,
        logistic::LogisticParams,
        vectorizer::DEFAULT_MAX_FEATURES,
    },
    error::ModelError,
    models::label::Label,
    training::{
        dataset::{self, Sample},
        metrics::ClassificationReport,
        split::train_test_split,
    },
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Seed used for shuffling and splitting.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub data_dir: PathBuf,
    pub output: PathBuf,
    pub max_features: usize,
    pub params: LogisticParams,
    pub test_size: f64,
    pub seed: u64,
}

impl TrainingOptions {
    pub fn new(data_dir: PathBuf, output: PathBuf) -> Self {
        Self {
            data_dir,
            output,
            max_features: DEFAULT_MAX_FEATURES,
            params: LogisticParams::default(),
            test_size: 0.2,
            seed: DEFAULT_SEED,
        }
    }
}

/// Summary of a training run.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub pipeline: Pipeline,
    pub report: ClassificationReport,
    pub label_counts: BTreeMap<Label, usize>,
    pub train_size: usize,
    pub test_size: usize,
    pub used_seed_corpus: bool,
}

/// Tiny hand-labelled corpus used when no dataset files are available.
pub fn seed_corpus() -> Vec<(&'static str, Label)> {
    vec![
        ("Hello, your order has been shipped. Track it here: example.com/track123", Label::Legit),
        ("You won a million dollars! Click here to claim: tinyurl.com/freecash", Label::Spam),
        ("Urgent: Verify your bank account details or it will be suspended. Login at: fakebank.com/login", Label::Phishing),
        ("Meeting reminder for tomorrow at 10 AM. Agenda attached.", Label::Legit),
        ("Your Netflix account is on hold. Update payment info now: netflix-support.info/update", Label::Phishing),
        ("Exclusive offer: Get rich quick! Visit: scam-site.net", Label::Spam),
        ("Regarding your recent query, we have updated your ticket.", Label::Legit),
        ("Dear customer, you have received a new message from HMRC. Follow the link to view: hmrc-online.co.uk", Label::Phishing),
        ("Congratulations, you've been selected for a free gift card. Click here!", Label::Spam),
        ("Project status update: all tasks are proceeding as planned.", Label::Legit),
    ]
}

/// Run a full training pass without writing anything to disk.
pub fn train(options: &TrainingOptions) -> Result<TrainingOutcome, ModelError> {
    let loaded = dataset::load_dir(&options.data_dir);

    let (samples, used_seed_corpus) = if loaded.is_empty() {
        tracing::warn!(
            data_dir = %options.data_dir.display(),
            "No external datasets loaded, using built-in seed corpus"
        );
        let seed: Vec<Sample> = seed_corpus()
            .into_iter()
            .map(|(text, label)| Sample::new(text, label))
            .collect();
        (seed, true)
    } else {
        let (combined, removed) = dataset::dedup_and_shuffle(loaded, options.seed);
        tracing::info!(removed, examples = combined.len(), "Combined and deduplicated datasets");
        (combined, false)
    };

    if samples.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }

    let mut label_counts: BTreeMap<Label, usize> = BTreeMap::new();
    for sample in &samples {
        *label_counts.entry(sample.label).or_default() += 1;
    }
    tracing::info!(?label_counts, "Label distribution");

    let split = train_test_split(samples, options.test_size, options.seed);
    let (train_texts, train_labels): (Vec<&str>, Vec<Label>) = split
        .train
        .iter()
        .map(|s| (s.text.as_str(), s.label))
        .unzip();

    tracing::info!(
        train = split.train.len(),
        test = split.test.len(),
        stratified = split.stratified,
        "Training model"
    );
    let pipeline = Pipeline::fit(
        &train_texts,
        &train_labels,
        options.max_features,
        options.params,
    )?;

    let actual: Vec<Label> = split.test.iter().map(|s| s.label).collect();
    let predicted: Vec<Label> = split.test.iter().map(|s| pipeline.predict(&s.text).0).collect();
    let report = ClassificationReport::compute(&actual, &predicted);
    tracing::info!(
        accuracy = report.accuracy,
        precision = report.weighted_precision,
        recall = report.weighted_recall,
        f1 = report.weighted_f1,
        "Evaluated model on test set"
    );

    Ok(TrainingOutcome {
        pipeline,
        report,
        label_counts,
        train_size: split.train.len(),
        test_size: split.test.len(),
        used_seed_corpus,
    })
}

/// Train and write the model to `options.output`.
pub fn train_and_save(options: &TrainingOptions) -> Result<TrainingOutcome, ModelError> {
    let outcome = train(options)?;
    outcome.pipeline.save(&options.output)?;
    Ok(outcome)
}
