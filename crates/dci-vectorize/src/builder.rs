// crates/dci-vectorize/src/builder.rs
//
// Count and TF-IDF vector space builder.
//
// A builder is fit on one corpus (learning the vocabulary and, for TF-IDF,
// the inverse document frequencies) and the resulting `FittedVectorSpace`
// transforms any corpus against that fixed vocabulary.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use dci_core::{DciError, SparseMatrix, Vocabulary};

use crate::tokenize::tokenize;

/// Term weighting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Raw term counts.
    Count,
    /// TF-IDF with smoothed idf and L2-normalized rows.
    TfIdf,
}

/// Configuration for building a vector space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSpaceBuilder {
    /// Weighting applied by the fitted space.
    pub weighting: Weighting,
    /// Minimum number of fitting documents a term must occur in.
    pub min_df: usize,
    /// Replace tf by `1 + ln(tf)` (TF-IDF only).
    pub sublinear_tf: bool,
}

impl VectorSpaceBuilder {
    /// A builder with `min_df = 1` and sublinear tf enabled.
    pub fn new(weighting: Weighting) -> Self {
        Self {
            weighting,
            min_df: 1,
            sublinear_tf: true,
        }
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    pub fn with_sublinear_tf(mut self, enabled: bool) -> Self {
        self.sublinear_tf = enabled;
        self
    }

    /// Learn the vocabulary (terms with document frequency ≥ `min_df`, sorted
    /// lexicographically) and idf weights from `docs`.
    pub fn fit<S: AsRef<str>>(&self, docs: &[S]) -> Result<FittedVectorSpace, DciError> {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for t in seen {
                *df.entry(t).or_insert(0) += 1;
            }
        }

        let terms: Vec<String> = df
            .iter()
            .filter(|(_, &n)| n >= self.min_df)
            .map(|(t, _)| t.to_string())
            .collect();
        if terms.is_empty() {
            return Err(DciError::InputSchema(format!(
                "empty vocabulary: no term occurs in at least {} of {} documents",
                self.min_df,
                docs.len()
            )));
        }

        let vocabulary = Vocabulary::from_terms(terms)?;
        tracing::debug!(
            "Fitted vocabulary of {} terms from {} documents (min_df={})",
            vocabulary.len(),
            docs.len(),
            self.min_df
        );
        Ok(self.finish(vocabulary, &tokenized))
    }

    /// Keep `vocabulary` fixed and learn only the idf weights from `docs`.
    pub fn fit_with_vocabulary<S: AsRef<str>>(
        &self,
        vocabulary: Vocabulary,
        docs: &[S],
    ) -> FittedVectorSpace {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();
        self.finish(vocabulary, &tokenized)
    }

    fn finish(&self, vocabulary: Vocabulary, tokenized: &[Vec<String>]) -> FittedVectorSpace {
        let idf = match self.weighting {
            Weighting::Count => None,
            Weighting::TfIdf => {
                let mut df = vec![0usize; vocabulary.len()];
                for tokens in tokenized {
                    let mut cols: Vec<usize> =
                        tokens.iter().filter_map(|t| vocabulary.index_of(t)).collect();
                    cols.sort_unstable();
                    cols.dedup();
                    for c in cols {
                        df[c] += 1;
                    }
                }
                let n = tokenized.len() as f64;
                Some(
                    df.iter()
                        .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
                        .collect(),
                )
            }
        };
        FittedVectorSpace {
            vocabulary,
            idf,
            sublinear_tf: self.sublinear_tf,
        }
    }
}

/// A vocabulary plus (optionally) idf weights, ready to transform documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedVectorSpace {
    vocabulary: Vocabulary,
    idf: Option<Vec<f64>>,
    sublinear_tf: bool,
}

impl FittedVectorSpace {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Consume the space, keeping only its vocabulary.
    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }

    /// Documents × vocabulary matrix. Out-of-vocabulary tokens are ignored.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<SparseMatrix, DciError> {
        let mut rows = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut counts: HashMap<usize, f64> = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                if let Some(c) = self.vocabulary.index_of(&token) {
                    *counts.entry(c).or_insert(0.0) += 1.0;
                }
            }
            let mut row: Vec<(usize, f64)> = counts.into_iter().collect();
            row.sort_by_key(|&(c, _)| c);

            if let Some(idf) = &self.idf {
                for (c, v) in row.iter_mut() {
                    let tf = if self.sublinear_tf { 1.0 + v.ln() } else { *v };
                    *v = tf * idf[*c];
                }
                let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, v) in row.iter_mut() {
                        *v /= norm;
                    }
                }
            }
            rows.push(row);
        }
        SparseMatrix::from_rows(self.vocabulary.len(), rows)
    }
}
