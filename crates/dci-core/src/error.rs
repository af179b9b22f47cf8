// crates/dci-core/src/error.rs

use thiserror::Error;

/// Workspace-wide error types for the DCI pipeline.
///
/// Every variant is fatal for a run. Recoverable conditions (floored PMI
/// entries, untranslatable candidate terms) are counted on the artifacts that
/// produce them and never surface as errors.
#[derive(Debug, Error)]
pub enum DciError {
    /// Labeled corpus violates the binary-label schema or is malformed.
    #[error("Input schema error: {0}")]
    InputSchema(String),

    /// A required file does not exist or cannot be read.
    #[error("Missing resource: {0}")]
    MissingResource(String),

    /// Pivot filtering left no candidate pair.
    #[error("No pivots available: {0}")]
    NoPivotsAvailable(String),

    /// Matrix, label vector, or vocabulary dimensions disagree.
    #[error("Shape error: {0}")]
    Shape(String),

    /// The classifier could not be trained or applied.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Invalid run parameters or configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying I/O failure while reading inputs or writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for DciError {
    fn from(e: serde_json::Error) -> Self {
        DciError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DciError = io.into();
        assert!(matches!(err, DciError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn display_prefixes_variant() {
        let err = DciError::NoPivotsAvailable("0 of 12 candidates survived".to_string());
        assert_eq!(
            err.to_string(),
            "No pivots available: 0 of 12 candidates survived"
        );
    }
}
