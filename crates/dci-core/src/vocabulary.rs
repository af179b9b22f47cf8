// crates/dci-core/src/vocabulary.rs
//
// Term <-> column index mapping for one domain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DciError;

/// Bijective mapping between term strings and dense 0-based column indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary where each term's column is its position in `terms`.
    ///
    /// Fails on duplicate terms.
    pub fn from_terms(terms: Vec<String>) -> Result<Self, DciError> {
        let mut index = HashMap::with_capacity(terms.len());
        for (i, t) in terms.iter().enumerate() {
            if index.insert(t.clone(), i).is_some() {
                return Err(DciError::Shape(format!("duplicate vocabulary term '{}'", t)));
            }
        }
        Ok(Self { index, terms })
    }

    /// Build from an explicit term -> column map.
    ///
    /// The columns must cover exactly `0..map.len()`.
    pub fn from_map(map: HashMap<String, usize>) -> Result<Self, DciError> {
        let n = map.len();
        let mut terms: Vec<Option<String>> = vec![None; n];
        for (t, &i) in &map {
            if i >= n {
                return Err(DciError::Shape(format!(
                    "term '{}' maps to column {} outside 0..{}",
                    t, i, n
                )));
            }
            if terms[i].is_some() {
                return Err(DciError::Shape(format!("column {} assigned twice", i)));
            }
            terms[i] = Some(t.clone());
        }
        let terms = terms.into_iter().flatten().collect();
        Ok(Self { index: map, terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of a term, if present.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term stored at a column, if in range.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
