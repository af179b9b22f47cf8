// crates/dci-transform/src/unify.rs
//
// Pooling of source and target correspondence profiles.
//
// Every aligned (source term, target term) pair denotes one concept; its
// pooled profile is the mean of the two domain-local rows. A term taking
// part in several pairs receives the mean of its pooled rows. Terms without
// a counterpart keep their domain-local profile.

use dci_core::{DciError, DenseMatrix, RowAccess};

use crate::align::AlignedPair;
use crate::correspondence::CorrespondenceProfile;

/// Pool two profiles over the aligned pairs, returning fresh (source, target) profiles.
pub fn unify_profiles(
    source: &CorrespondenceProfile,
    target: &CorrespondenceProfile,
    pairs: &[AlignedPair],
) -> Result<(CorrespondenceProfile, CorrespondenceProfile), DciError> {
    if source.n_pivots() != target.n_pivots() {
        return Err(DciError::Shape(format!(
            "cannot unify profiles with {} and {} pivots",
            source.n_pivots(),
            target.n_pivots()
        )));
    }
    let k = source.n_pivots();

    let mut source_sum = DenseMatrix::zeros(source.n_terms(), k);
    let mut target_sum = DenseMatrix::zeros(target.n_terms(), k);
    let mut source_hits = vec![0usize; source.n_terms()];
    let mut target_hits = vec![0usize; target.n_terms()];

    for pair in pairs {
        if pair.source_col >= source.n_terms() || pair.target_col >= target.n_terms() {
            return Err(DciError::Shape(format!(
                "aligned pair ({}, {}) outside profile rows",
                pair.source_col, pair.target_col
            )));
        }
        for j in 0..k {
            let pooled =
                (source.matrix.get(pair.source_col, j) + target.matrix.get(pair.target_col, j)) / 2.0;
            let s = source_sum.get(pair.source_col, j);
            source_sum.set(pair.source_col, j, s + pooled);
            let t = target_sum.get(pair.target_col, j);
            target_sum.set(pair.target_col, j, t + pooled);
        }
        source_hits[pair.source_col] += 1;
        target_hits[pair.target_col] += 1;
    }

    let unified_source = merge(&source.matrix, source_sum, &source_hits);
    let unified_target = merge(&target.matrix, target_sum, &target_hits);
    let pooled_terms = source_hits.iter().filter(|&&h| h > 0).count();
    tracing::debug!(
        "Unified profiles over {} aligned pairs ({} source terms pooled)",
        pairs.len(),
        pooled_terms
    );

    Ok((
        CorrespondenceProfile {
            dcf: source.dcf,
            matrix: unified_source,
            degenerate_entries: source.degenerate_entries,
        },
        CorrespondenceProfile {
            dcf: target.dcf,
            matrix: unified_target,
            degenerate_entries: target.degenerate_entries,
        },
    ))
}

/// Rows with hits become the mean of their pooled rows; the rest copy `local`.
fn merge(local: &DenseMatrix, mut sums: DenseMatrix, hits: &[usize]) -> DenseMatrix {
    for (r, &h) in hits.iter().enumerate() {
        for c in 0..local.n_cols() {
            let v = if h == 0 {
                local.get(r, c)
            } else {
                sums.get(r, c) / h as f64
            };
            sums.set(r, c, v);
        }
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcf::Dcf;

    fn profile(rows: Vec<Vec<f64>>) -> CorrespondenceProfile {
        CorrespondenceProfile {
            dcf: Dcf::Cosine,
            matrix: DenseMatrix::from_rows(2, rows).unwrap(),
            degenerate_entries: 0,
        }
    }

    fn pair(s: usize, t: usize) -> AlignedPair {
        AlignedPair {
            source_col: s,
            target_col: t,
        }
    }

    #[test]
    fn aligned_rows_are_averaged() {
        let s = profile(vec![vec![1.0, 0.0], vec![0.4, 0.4]]);
        let t = profile(vec![vec![0.0, 1.0], vec![0.5, 0.25], vec![0.9, 0.9]]);
        let (us, ut) = unify_profiles(&s, &t, &[pair(0, 1)]).unwrap();
        assert_eq!(us.matrix.row(0), &[0.75, 0.125]);
        assert_eq!(ut.matrix.row(1), &[0.75, 0.125]);
        // Unpaired rows are untouched.
        assert_eq!(us.matrix.row(1), &[0.4, 0.4]);
        assert_eq!(ut.matrix.row(0), &[0.0, 1.0]);
        assert_eq!(ut.matrix.row(2), &[0.9, 0.9]);
    }

    #[test]
    fn many_to_one_pairs_average_pooled_rows() {
        let s = profile(vec![vec![1.0, 1.0]]);
        let t = profile(vec![vec![0.0, 0.0], vec![1.0, -1.0]]);
        let (us, ut) = unify_profiles(&s, &t, &[pair(0, 0), pair(0, 1)]).unwrap();
        // pooled rows: [0.5, 0.5] and [1.0, 0.0]
        assert_eq!(us.matrix.row(0), &[0.75, 0.25]);
        assert_eq!(ut.matrix.row(0), &[0.5, 0.5]);
        assert_eq!(ut.matrix.row(1), &[1.0, 0.0]);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let s = profile(vec![vec![1.0, 0.0]]);
        let t = profile(vec![vec![0.0, 1.0]]);
        let before = (s.clone(), t.clone());
        let _ = unify_profiles(&s, &t, &[pair(0, 0)]).unwrap();
        assert_eq!((s, t), before);
    }

    #[test]
    fn pivot_count_mismatch_rejected() {
        let s = profile(vec![vec![1.0, 0.0]]);
        let t = CorrespondenceProfile {
            dcf: Dcf::Cosine,
            matrix: DenseMatrix::from_rows(1, vec![vec![1.0]]).unwrap(),
            degenerate_entries: 0,
        };
        assert!(unify_profiles(&s, &t, &[]).is_err());
    }
}
