// crates/dci-pipeline/src/induction.rs
//
// DCI induction: project both domains, train a classifier on the projected
// source, and score the projected target.

use std::time::{Duration, Instant};

use dci_classify::{accuracy, CSearch, ClassifierParams, LinearClassifier};
use dci_core::{DciError, Domain, Label, MarginClassifier, PivotSet, RowAccess};
use dci_transform::{AlignedPair, Dci};

/// Classifier options for one induction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InductionOptions {
    /// Cross-validated search over the classifier's C before the final fit.
    pub optimize: bool,
    /// Scores above this are predicted as label 1.
    pub threshold: f64,
}

impl Default for InductionOptions {
    fn default() -> Self {
        Self {
            optimize: false,
            threshold: 0.5,
        }
    }
}

/// What one induction produced.
#[derive(Debug, Clone, PartialEq)]
pub struct InductionOutcome {
    /// Accuracy of `predictions` against the target labels.
    pub accuracy: f64,
    /// Profiles, projection and standardization.
    pub dci_time: Duration,
    /// Classifier training, including any C search.
    pub classifier_time: Duration,
    /// Scoring of the target documents.
    pub test_time: Duration,
    /// One score per target labeled document, in input order.
    pub scores: Vec<f64>,
    /// `scores` thresholded to 0/1.
    pub predictions: Vec<Label>,
    /// C of the trained classifier.
    pub c: f64,
}

/// Run DCI induction with the regularized linear classifier.
pub fn dci_induction(
    source: &Domain,
    target: &Domain,
    pivots: &PivotSet,
    alignment: &[AlignedPair],
    dci: &Dci,
    options: &InductionOptions,
) -> Result<InductionOutcome, DciError> {
    let start = Instant::now();
    let projected = dci.fit_transform(source, target, pivots, alignment)?;
    let dci_time = start.elapsed();
    tracing::info!(
        "DCI projection ({}): {} source x {} target documents in {} dimensions, {:.5}s",
        dci.config.dcf,
        projected.source.n_rows(),
        projected.target.n_rows(),
        projected.source.n_cols(),
        dci_time.as_secs_f64()
    );

    let start = Instant::now();
    let c = if options.optimize {
        CSearch::new()
            .with_threshold(options.threshold)
            .search(&projected.source, source.y())?
            .best_c
    } else {
        ClassifierParams::default().c
    };
    let mut classifier = LinearClassifier::with_c(c);
    classifier.fit(&projected.source, source.y())?;
    let classifier_time = start.elapsed();

    let start = Instant::now();
    let scores = classifier.predict_scores(&projected.target)?;
    let test_time = start.elapsed();

    let predictions = threshold_scores(&scores, options.threshold);
    let accuracy = accuracy(target.y(), &predictions)?;
    tracing::info!(
        "Induction: C={}, target accuracy {:.4} (classifier {:.5}s, test {:.5}s)",
        c,
        accuracy,
        classifier_time.as_secs_f64(),
        test_time.as_secs_f64()
    );

    Ok(InductionOutcome {
        accuracy,
        dci_time,
        classifier_time,
        test_time,
        scores,
        predictions,
        c,
    })
}

/// Train any margin classifier on the projected source and score the target.
///
/// Returns the target scores.
pub fn induce_with(
    source: &Domain,
    target: &Domain,
    pivots: &PivotSet,
    alignment: &[AlignedPair],
    dci: &Dci,
    classifier: &mut dyn MarginClassifier,
) -> Result<Vec<f64>, DciError> {
    let projected = dci.fit_transform(source, target, pivots, alignment)?;
    classifier.fit(&projected.source, source.y())?;
    classifier.predict_scores(&projected.target)
}

/// Label 1 where the score is strictly above `threshold`.
pub fn threshold_scores(scores: &[f64], threshold: f64) -> Vec<Label> {
    scores.iter().map(|&s| Label::from(s > threshold)).collect()
}
