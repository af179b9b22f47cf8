// crates/dci-core/src/traits.rs

use crate::domain::Label;
use crate::error::DciError;
use crate::matrix::DenseMatrix;

/// Term translation lookup used to align vocabularies across languages.
///
/// Implemented by the dictionary oracle in dci-pipeline.
pub trait TermOracle: Send + Sync {
    /// Zero or more candidate translations of a source-language term.
    fn translations(&self, term: &str) -> &[String];
}

/// Binary classifier producing continuous scores.
///
/// Implemented by dci-classify's regularized linear classifier.
pub trait MarginClassifier: Send + Sync {
    /// Train on dense feature rows and their labels.
    fn fit(&mut self, x: &DenseMatrix, y: &[Label]) -> Result<(), DciError>;

    /// Score each row. Higher means more likely positive (label 1).
    fn predict_scores(&self, x: &DenseMatrix) -> Result<Vec<f64>, DciError>;
}

/// Sink for monotonically increasing run progress (0..=100).
pub trait ProgressReporter: Send + Sync {
    /// Record progress, optionally with a human-readable status message.
    fn report(&self, progress: u8, message: Option<&str>);
}
