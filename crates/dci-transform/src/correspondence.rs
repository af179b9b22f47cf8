// crates/dci-transform/src/correspondence.rs
//
// Distributional correspondence profiles.
//
// For one domain and one pivot set, every vocabulary term gets a vector whose
// i-th entry is the correspondence between the term and the i-th pivot,
// measured over the domain's unlabeled matrix `U`. Terms are independent of
// each other, so rows are computed in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use dci_core::{DciError, DenseMatrix, RowAccess, SparseMatrix};

use crate::dcf::{Dcf, PairStatistics};

/// Terms × pivots correspondence matrix for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrespondenceProfile {
    /// The function that produced the entries.
    pub dcf: Dcf,
    /// Row `t` is the profile of vocabulary term `t`.
    pub matrix: DenseMatrix,
    /// Entries replaced by the function's floor because the measure was undefined.
    pub degenerate_entries: usize,
}

impl CorrespondenceProfile {
    pub fn n_terms(&self) -> usize {
        self.matrix.n_rows()
    }

    pub fn n_pivots(&self) -> usize {
        self.matrix.n_cols()
    }
}

/// Compute the correspondence profile of every column of `u` against the
/// pivot columns `pivot_cols`.
pub fn compute_profile(
    u: &SparseMatrix,
    pivot_cols: &[usize],
    dcf: Dcf,
) -> Result<CorrespondenceProfile, DciError> {
    let n_terms = u.n_cols();
    let n_docs = u.n_rows();
    if let Some(&bad) = pivot_cols.iter().find(|&&c| c >= n_terms) {
        return Err(DciError::Shape(format!(
            "pivot column {} outside vocabulary of {} terms",
            bad, n_terms
        )));
    }

    let postings = u.column_postings();
    let df = u.document_frequencies();
    let norms: Vec<f64> = postings
        .iter()
        .map(|col| col.iter().map(|(_, w)| w * w).sum::<f64>().sqrt())
        .collect();

    // Dense pivot columns: pivot_weights[k][d] = U[d, pivot_k].
    let pivot_weights: Vec<Vec<f64>> = pivot_cols
        .iter()
        .map(|&p| {
            let mut column = vec![0.0; n_docs];
            for &(d, w) in &postings[p] {
                column[d] = w;
            }
            column
        })
        .collect();

    let function = dcf.function();
    let floor = function.floor();
    let k = pivot_cols.len();

    let rows: Vec<(Vec<f64>, usize)> = (0..n_terms)
        .into_par_iter()
        .map(|t| {
            let mut dot = vec![0.0; k];
            let mut cooccurrences = vec![0usize; k];
            for &(d, w) in &postings[t] {
                for (j, column) in pivot_weights.iter().enumerate() {
                    let pw = column[d];
                    if pw != 0.0 {
                        dot[j] += w * pw;
                        cooccurrences[j] += 1;
                    }
                }
            }

            let mut degenerate = 0usize;
            let row: Vec<f64> = (0..k)
                .map(|j| {
                    let p = pivot_cols[j];
                    let stats = PairStatistics {
                        dot: dot[j],
                        term_norm: norms[t],
                        pivot_norm: norms[p],
                        cooccurrences: cooccurrences[j],
                        term_df: df[t],
                        pivot_df: df[p],
                        n_docs,
                    };
                    function.correspond(&stats).unwrap_or_else(|| {
                        degenerate += 1;
                        floor
                    })
                })
                .collect();
            (row, degenerate)
        })
        .collect();

    let degenerate_entries: usize = rows.iter().map(|(_, d)| d).sum();
    let matrix = DenseMatrix::from_rows(k, rows.into_iter().map(|(r, _)| r).collect())?;

    if degenerate_entries > 0 {
        tracing::debug!(
            "{}: floored {} undefined entries to {}",
            dcf,
            degenerate_entries,
            floor
        );
    }
    tracing::debug!(
        "Computed {} profile: {} terms x {} pivots over {} documents",
        dcf,
        n_terms,
        k,
        n_docs
    );

    Ok(CorrespondenceProfile {
        dcf,
        matrix,
        degenerate_entries,
    })
}
