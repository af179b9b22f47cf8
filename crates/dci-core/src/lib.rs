// crates/dci-core/src/lib.rs
//
// dci-core: Core matrices, domain types, traits, and errors for
// Distributional Correspondence Indexing (DCI).
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the term-document matrices, vocabularies, domains, pivot sets,
// the error type, and the trait seams (oracle, classifier, progress) used by
// the transform and pipeline crates.

pub mod domain;
pub mod error;
pub mod matrix;
pub mod pivot;
pub mod traits;
pub mod vocabulary;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use dci_core::Domain;`

// Matrix types
pub use matrix::{DenseMatrix, RowAccess, SparseMatrix};

// Domain types
pub use domain::{Domain, Label};
pub use vocabulary::Vocabulary;

// Pivot types
pub use pivot::{Pivot, PivotSet};

// Error type
pub use error::DciError;

// Traits
pub use traits::{MarginClassifier, ProgressReporter, TermOracle};
