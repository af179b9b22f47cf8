// crates/dci-pipeline/tests/cross_run.rs
//
// End-to-end tests of the cross-domain runner on small CSV corpora written
// to temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use dci_core::DciError;
use dci_pipeline::{run_cross, RecordingProgress, RunKind, RunParams, PREDICTIONS_FILE, REPORT_FILE};
use dci_transform::{Dcf, Standardization};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a fresh temporary directory using a UUID to avoid conflicts.
fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dci_test_{}_{}", label, Uuid::now_v7()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const SOURCE_TRAIN: &str = "text,label\n\
good great plot,pos\n\
good fun story,pos\n\
bad boring plot,neg\n\
bad awful story,neg\n";

const TARGET_TEST: &str = "text,label\n\
good great sound,pos\n\
good fun music,pos\n\
bad boring sound,neg\n\
bad awful music,neg\n";

/// Four labeled documents per side over a shared language.
fn same_language_params(dir: &Path) -> RunParams {
    let mut params = RunParams::new(
        write(dir, "source_train.csv", SOURCE_TRAIN),
        write(dir, "target_test.csv", TARGET_TEST),
    );
    params.dcf = Dcf::Linear;
    params.npivots = 2;
    params.phi = 1;
    params.output_dir = dir.join("out");
    params
}

fn cross_language_params(dir: &Path) -> RunParams {
    let mut params = RunParams::new(
        write(dir, "source_train.csv", SOURCE_TRAIN),
        write(
            dir,
            "target_test.csv",
            "text,label\n\
             gut toll klang,pos\n\
             gut spass musik,pos\n\
             schlecht langweilig klang,neg\n\
             schlecht furchtbar musik,neg\n",
        ),
    );
    params.source_unlabeled = Some(write(
        dir,
        "source_unlabeled.csv",
        "text\ngood fun\nbad boring\ngreat plot\n",
    ));
    params.target_unlabeled = Some(write(
        dir,
        "target_unlabeled.csv",
        "text\ngut spass\nschlecht langweilig\ntoll klang\n",
    ));
    params.dictionary = Some(write(
        dir,
        "dictionary.csv",
        "en,de\n\
         good,gut\n\
         bad,schlecht\n\
         great,toll\n\
         fun,spass\n\
         boring,langweilig\n\
         awful,furchtbar\n",
    ));
    params.npivots = 3;
    params.phi = 1;
    params.output_dir = dir.join("out");
    params
}

fn strictly_increasing(values: &[u8]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn same_language_run_produces_artifacts() {
    let dir = temp_dir("same_language");
    let params = same_language_params(&dir);
    let progress = RecordingProgress::new();

    let outcome = run_cross(RunKind::NoDict, &params, &progress).unwrap();

    assert_eq!(outcome.kind, RunKind::NoDict);
    assert_eq!(outcome.pivots, 2);
    assert_eq!(outcome.target_documents, 4);
    assert_eq!(outcome.labels, ["neg".to_string(), "pos".to_string()]);
    assert!((0.0..=1.0).contains(&outcome.accuracy));

    let predictions = fs::read_to_string(dir.join("out").join(PREDICTIONS_FILE)).unwrap();
    let lines: Vec<&str> = predictions.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| *l == "neg" || *l == "pos"));

    let report = fs::read_to_string(dir.join("out").join(REPORT_FILE)).unwrap();
    let report_lines: Vec<&str> = report.lines().collect();
    assert!(report_lines[0].starts_with("pivot selection time = "));
    assert!(report_lines[1].starts_with("dci time = "));
    assert!(report_lines[2].starts_with("classifier time = "));
    assert!(report_lines[3].starts_with("test time = "));
    assert_eq!(report_lines[4], "");
    assert!(report.contains("Predicted"));
    assert!(report.contains("macro avg"));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn progress_is_monotonic_and_skips_absent_inputs() {
    let dir = temp_dir("progress");
    let params = same_language_params(&dir);
    let progress = RecordingProgress::new();
    run_cross(RunKind::NoDict, &params, &progress).unwrap();

    let values = progress.values();
    assert!(strictly_increasing(&values), "{:?}", values);
    assert_eq!(values, vec![0, 1, 2, 6, 12, 21, 33, 47, 63, 95, 100]);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn cross_language_run_uses_dictionary() {
    let dir = temp_dir("cross_language");
    let mut params = cross_language_params(&dir);
    params.unify = true;
    params.standardization = Standardization::Normal;
    let progress = RecordingProgress::new();

    let outcome = run_cross(RunKind::Full, &params, &progress).unwrap();

    assert_eq!(outcome.kind, RunKind::Full);
    assert!(outcome.pivots >= 1 && outcome.pivots <= 3);
    assert_eq!(outcome.aligned_pairs, 6);
    assert_eq!(outcome.target_documents, 4);
    assert_eq!(
        progress.values(),
        vec![0, 1, 2, 4, 6, 8, 10, 12, 21, 32, 33, 47, 63, 95, 100]
    );

    fs::remove_dir_all(dir).ok();
}

#[test]
fn labeled_only_cross_language_run() {
    let dir = temp_dir("nounlabeled");
    let mut params = cross_language_params(&dir);
    params.source_unlabeled = None;
    params.target_unlabeled = None;
    let progress = RecordingProgress::new();

    let outcome = run_cross(RunKind::NoUnlabeled, &params, &progress).unwrap();

    assert_eq!(outcome.kind, RunKind::NoUnlabeled);
    assert_eq!(outcome.aligned_pairs, 6);
    assert!(outcome.pivots >= 1);
    assert_eq!(outcome.target_documents, 4);
    assert_eq!(
        progress.values(),
        vec![0, 1, 2, 6, 10, 12, 21, 32, 33, 47, 63, 95, 100]
    );
    let predictions = fs::read_to_string(&outcome.predictions_path).unwrap();
    assert_eq!(predictions.lines().count(), 4);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn requested_run_kind_is_reported_as_given() {
    let dir = temp_dir("full_without_unlabeled");
    let mut params = cross_language_params(&dir);
    params.source_unlabeled = None;
    params.target_unlabeled = None;

    let outcome = run_cross(RunKind::Full, &params, &RecordingProgress::new()).unwrap();
    assert_eq!(outcome.kind, RunKind::Full);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn run_shape_is_validated_before_loading() {
    let dir = temp_dir("shape");
    let params = cross_language_params(&dir);
    let progress = RecordingProgress::new();

    let err = run_cross(RunKind::NoDict, &params, &progress).unwrap_err();
    assert!(matches!(err, DciError::Config(_)));
    assert_eq!(progress.values(), vec![0, 1]);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn repeated_runs_are_identical() {
    let dir = temp_dir("determinism");
    let mut params = cross_language_params(&dir);
    params.dcf = Dcf::Pmi;
    params.optimize = true;

    params.output_dir = dir.join("first");
    let first = run_cross(RunKind::Full, &params, &RecordingProgress::new()).unwrap();
    params.output_dir = dir.join("second");
    let second = run_cross(RunKind::Full, &params, &RecordingProgress::new()).unwrap();

    assert_eq!(first.accuracy, second.accuracy);
    assert_eq!(first.c, second.c);
    assert_eq!(first.classification, second.classification);
    assert_eq!(
        fs::read_to_string(&first.predictions_path).unwrap(),
        fs::read_to_string(&second.predictions_path).unwrap()
    );
    // Everything after the timing lines matches.
    let tail = |path: &Path| {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .skip(4)
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    assert_eq!(tail(&first.report_path), tail(&second.report_path));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn untranslatable_dictionary_leaves_no_pivots() {
    let dir = temp_dir("no_pivots");
    let mut params = same_language_params(&dir);
    params.dictionary = Some(write(&dir, "dictionary.csv", "en,de\ngood,gut\nbad,schlecht\n"));
    let progress = RecordingProgress::new();

    let err = run_cross(RunKind::NoUnlabeled, &params, &progress).unwrap_err();
    assert!(matches!(err, DciError::NoPivotsAvailable(_)), "{}", err);
    // The run stopped at pivot selection.
    assert_eq!(progress.values().last(), Some(&33));
    assert!(!dir.join("out").join(PREDICTIONS_FILE).exists());

    fs::remove_dir_all(dir).ok();
}

#[test]
fn three_source_labels_is_schema_error() {
    let dir = temp_dir("three_labels");
    let mut params = same_language_params(&dir);
    params.source_train = write(
        &dir,
        "source_train.csv",
        "text,label\ngood,pos\nbad,neg\nmeh,neutral\n",
    );
    let err = run_cross(RunKind::NoDict, &params, &RecordingProgress::new()).unwrap_err();
    assert!(matches!(err, DciError::InputSchema(_)));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn unknown_target_label_is_schema_error() {
    let dir = temp_dir("target_label");
    let mut params = same_language_params(&dir);
    params.target_test = write(&dir, "target_test.csv", "text,label\ngood,pos\nbad,negative\n");
    let err = run_cross(RunKind::NoDict, &params, &RecordingProgress::new()).unwrap_err();
    assert!(matches!(err, DciError::InputSchema(_)));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn missing_corpus_is_missing_resource() {
    let dir = temp_dir("missing");
    let mut params = same_language_params(&dir);
    params.target_test = dir.join("does_not_exist.csv");
    let err = run_cross(RunKind::NoDict, &params, &RecordingProgress::new()).unwrap_err();
    assert!(matches!(err, DciError::MissingResource(_)));
    fs::remove_dir_all(dir).ok();
}
