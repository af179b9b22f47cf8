// crates/dci-core/src/domain.rs
//
// A domain bundles the labeled and unlabeled term-document matrices of one
// corpus (e.g. "books" reviews in English) over a single vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::DciError;
use crate::matrix::{RowAccess, SparseMatrix};
use crate::vocabulary::Vocabulary;

/// Binary label: 0 or 1.
pub type Label = u8;

/// An immutable, validated domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    /// Human-readable name (e.g. "source", "books").
    pub name: String,
    /// Language tag (e.g. "en", "de").
    pub language: String,
    x: SparseMatrix,
    y: Vec<Label>,
    u: SparseMatrix,
    vocabulary: Vocabulary,
}

impl Domain {
    /// Validate and assemble a domain.
    ///
    /// Requires `x.cols == u.cols == |vocabulary|`, `y.len() == x.rows`, and
    /// every label in {0, 1}.
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        x: SparseMatrix,
        y: Vec<Label>,
        u: SparseMatrix,
        vocabulary: Vocabulary,
    ) -> Result<Self, DciError> {
        let name = name.into();
        if x.n_cols() != vocabulary.len() || u.n_cols() != vocabulary.len() {
            return Err(DciError::Shape(format!(
                "domain '{}': X has {} columns, U has {}, vocabulary has {} terms",
                name,
                x.n_cols(),
                u.n_cols(),
                vocabulary.len()
            )));
        }
        if y.len() != x.n_rows() {
            return Err(DciError::Shape(format!(
                "domain '{}': {} labels for {} labeled documents",
                name,
                y.len(),
                x.n_rows()
            )));
        }
        if let Some(bad) = y.iter().find(|&&l| l > 1) {
            return Err(DciError::InputSchema(format!(
                "domain '{}': label {} is not binary",
                name, bad
            )));
        }
        Ok(Self {
            name,
            language: language.into(),
            x,
            y,
            u,
            vocabulary,
        })
    }

    /// Labeled documents × terms.
    pub fn x(&self) -> &SparseMatrix {
        &self.x
    }

    /// Labels aligned with the rows of `x`.
    pub fn y(&self) -> &[Label] {
        &self.y
    }

    /// All (labeled + unlabeled) documents × terms, used for co-occurrence statistics.
    pub fn u(&self) -> &SparseMatrix {
        &self.u
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }
}
