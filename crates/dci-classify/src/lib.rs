// crates/dci-classify/src/lib.rs
//
// dci-classify: Binary classification over projected DCI spaces.
//
// Provides the regularized linear classifier behind the `MarginClassifier`
// trait (smartcore logistic regression), the stratified cross-validation
// search over the regularization constant C, and the evaluation artifacts
// written to the run report.

pub mod linear;
pub mod metrics;
pub mod search;

pub use linear::{ClassifierParams, LinearClassifier};
pub use metrics::{accuracy, ClassMetrics, ClassificationReport, ConfusionMatrix};
pub use search::{stratified_folds, CSearch, SearchOutcome};
