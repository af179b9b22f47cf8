// crates/dci-pipeline/src/runner.rs
//
// End-to-end cross-domain run.
//
// Load corpora and dictionary, define both domains, align vocabularies,
// select pivots, run DCI induction, and write predictions.csv and report.txt
// into the output directory. Progress is reported at fixed milestones.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use dci_classify::{ClassificationReport, ConfusionMatrix};
use dci_core::{DciError, ProgressReporter, TermOracle};
use dci_transform::{align_vocabularies, select_pivots_timed, Dci};
use dci_vectorize::DomainBuilder;

use crate::corpus::{load_labeled, load_unlabeled, LabelSet};
use crate::induction::{dci_induction, InductionOptions};
use crate::oracle::DictionaryOracle;
use crate::params::{RunKind, RunParams};
use crate::progress::Milestone;
use crate::report::{write_predictions, write_report, StageTimings};

pub const PREDICTIONS_FILE: &str = "predictions.csv";
pub const REPORT_FILE: &str = "report.txt";

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub kind: RunKind,
    /// Label names in index order (0, 1).
    pub labels: [String; 2],
    pub accuracy: f64,
    pub timings: StageTimings,
    pub requested_pivots: usize,
    pub pivots: usize,
    pub aligned_pairs: usize,
    pub unaligned_terms: usize,
    /// C of the trained classifier.
    pub c: f64,
    pub target_documents: usize,
    pub classification: ClassificationReport,
    pub predictions_path: PathBuf,
    pub report_path: PathBuf,
}

fn load_unlabeled_or_empty(
    path: Option<&PathBuf>,
    milestone: Milestone,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<String>, DciError> {
    match path {
        Some(path) => {
            milestone.report(reporter);
            load_unlabeled(path)
        }
        None => Ok(vec![String::new()]),
    }
}

/// Execute one run of the given shape. Any error aborts the run; the caller
/// reports it.
pub fn run_cross(
    kind: RunKind,
    params: &RunParams,
    reporter: &dyn ProgressReporter,
) -> Result<RunOutcome, DciError> {
    Milestone::Started.report(reporter);
    Milestone::InputParameters.report_with(
        reporter,
        &format!(
            "kind={:?} dcf={} npivots={} phi={} standardization={} optimize={} unify={} cross_consistency={}",
            kind,
            params.dcf,
            params.npivots,
            params.phi,
            params.standardization,
            params.optimize,
            params.unify,
            params.cross_consistency
        ),
    );
    params.validate(kind)?;

    Milestone::LoadSourceTraining.report(reporter);
    let source_train = load_labeled(&params.source_train)?;
    let labels = LabelSet::from_labels(&source_train.labels)?;
    let source_y = labels.encode(&source_train.labels)?;

    let source_unlabeled = load_unlabeled_or_empty(
        params.source_unlabeled.as_ref(),
        Milestone::LoadSourceUnlabeled,
        reporter,
    )?;

    Milestone::LoadTargetTest.report(reporter);
    let target_test = load_labeled(&params.target_test)?;
    let target_y = labels.encode(&target_test.labels)?;

    let target_unlabeled = load_unlabeled_or_empty(
        params.target_unlabeled.as_ref(),
        Milestone::LoadTargetUnlabeled,
        reporter,
    )?;

    let dictionary = match &params.dictionary {
        Some(path) => {
            Milestone::LoadDictionary.report(reporter);
            Some(DictionaryOracle::load(path)?)
        }
        None => None,
    };

    Milestone::SourceDomain.report(reporter);
    let source = DomainBuilder::new("source", "source")
        .with_source(true)
        .with_min_df(params.min_df)
        .with_weighting(params.weighting)
        .build(&source_train.texts, source_y, &source_unlabeled)?;

    Milestone::TargetDomain.report(reporter);
    let target = DomainBuilder::new("target", "target")
        .with_min_df(params.min_df)
        .with_weighting(params.weighting)
        .build(&target_test.texts, target_y, &target_unlabeled)?;

    let oracle: Option<&dyn TermOracle> = match &dictionary {
        Some(dictionary) => {
            Milestone::Oracle.report(reporter);
            Some(dictionary)
        }
        None => None,
    };
    let alignment = align_vocabularies(source.vocabulary(), target.vocabulary(), oracle);
    tracing::info!(
        "Aligned {} term pairs ({} source terms without counterpart)",
        alignment.pairs.len(),
        alignment.unaligned_terms
    );

    Milestone::PivotSelection.report(reporter);
    let (pivots, pivot_time) =
        select_pivots_timed(&alignment.pairs, &source, &target, &params.pivot_config())?;
    tracing::info!(
        "Selected {} pivots in {:.5}s",
        pivots.len(),
        pivot_time.as_secs_f64()
    );

    Milestone::Dci.report(reporter);
    let dci = Dci::new(params.dci_config());

    Milestone::Induction.report(reporter);
    let options = InductionOptions {
        optimize: params.optimize,
        threshold: params.threshold,
    };
    let induction = dci_induction(&source, &target, &pivots, &alignment.pairs, &dci, &options)?;

    Milestone::SavingOutput.report(reporter);
    fs::create_dir_all(&params.output_dir)?;
    let predictions_path = params.output_dir.join(PREDICTIONS_FILE);
    let report_path = params.output_dir.join(REPORT_FILE);

    write_predictions(&predictions_path, &induction.predictions, &labels)?;
    let timings = StageTimings {
        pivot_selection: pivot_time.as_secs_f64(),
        dci: induction.dci_time.as_secs_f64(),
        classifier: induction.classifier_time.as_secs_f64(),
        test: induction.test_time.as_secs_f64(),
    };
    let confusion = ConfusionMatrix::new(labels.names().clone(), target.y(), &induction.predictions)?;
    let classification =
        ClassificationReport::new(labels.names().clone(), target.y(), &induction.predictions)?;
    write_report(&report_path, &timings, &confusion, &classification)?;

    Milestone::Done.report(reporter);
    Ok(RunOutcome {
        kind,
        labels: labels.names().clone(),
        accuracy: induction.accuracy,
        timings,
        requested_pivots: params.npivots,
        pivots: pivots.len(),
        aligned_pairs: alignment.pairs.len(),
        unaligned_terms: alignment.unaligned_terms,
        c: induction.c,
        target_documents: induction.predictions.len(),
        classification,
        predictions_path,
        report_path,
    })
}
