// crates/dci-pipeline/src/lib.rs
//
// dci-pipeline: End-to-end cross-domain DCI runs.
//
// Loads labeled/unlabeled corpora and the optional translation dictionary,
// builds both domains, selects pivots, runs DCI induction, and writes the
// predictions and report artifacts while reporting progress milestones.

pub mod corpus;
pub mod induction;
pub mod oracle;
pub mod params;
pub mod progress;
pub mod report;
pub mod runner;

pub use corpus::{load_labeled, load_unlabeled, LabelSet, LabeledCorpus, EMPTY_TEXT};
pub use induction::{dci_induction, induce_with, threshold_scores, InductionOptions, InductionOutcome};
pub use oracle::DictionaryOracle;
pub use params::{RunKind, RunParams};
pub use progress::{Milestone, RecordingProgress};
pub use report::{render_report, write_predictions, write_report, StageTimings};
pub use runner::{run_cross, RunOutcome, PREDICTIONS_FILE, REPORT_FILE};
