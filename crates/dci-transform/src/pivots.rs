// crates/dci-transform/src/pivots.rs
//
// Pivot selection.
//
// Pivots are aligned term pairs that are frequent enough in both unlabeled
// corpora to be reliable anchors and informative about the label in the
// source domain. Informativeness is the information gain between term
// presence and the binary label on the labeled source documents.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use dci_core::{DciError, Domain, Label, Pivot, PivotSet, RowAccess, SparseMatrix};

use crate::align::AlignedPair;

/// Parameters for pivot selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotSelectionConfig {
    /// Maximum number of pivots to return. Default: 450.
    pub npivots: usize,
    /// Minimum document frequency of a pivot in each domain's unlabeled matrix. Default: 30.
    pub phi: usize,
    /// Reject pivots whose prevalence differs too much across domains. Default: false.
    pub cross_consistency: bool,
    /// Largest tolerated ratio between the two relative document frequencies. Default: 5.0.
    pub max_prevalence_ratio: f64,
}

impl Default for PivotSelectionConfig {
    fn default() -> Self {
        Self {
            npivots: 450,
            phi: 30,
            cross_consistency: false,
            max_prevalence_ratio: 5.0,
        }
    }
}

/// Select up to `config.npivots` pivots from the aligned candidates.
///
/// # Steps
/// 1. Keep pairs whose source df (in source `U`) and target df (in target `U`) are ≥ `phi`.
/// 2. Optionally keep only pairs with consistent relative prevalence across domains.
/// 3. Score by information gain on the labeled source data.
/// 4. Sort by descending score (ties by source, then target column) and take
///    the top pairs, never reusing a source or target column.
///
/// Returns `NoPivotsAvailable` when nothing survives.
pub fn select_pivots(
    candidates: &[AlignedPair],
    source: &Domain,
    target: &Domain,
    config: &PivotSelectionConfig,
) -> Result<PivotSet, DciError> {
    if config.npivots == 0 {
        return Err(DciError::Config("npivots must be at least 1".to_string()));
    }

    let source_df = source.u().document_frequencies();
    let target_df = target.u().document_frequencies();
    let source_docs = source.u().n_rows().max(1) as f64;
    let target_docs = target.u().n_rows().max(1) as f64;
    let gains = information_gain(source.x(), source.y());

    let mut scored = Vec::new();
    let mut inconsistent = 0usize;
    for pair in candidates {
        let (Some(&sdf), Some(&tdf)) = (source_df.get(pair.source_col), target_df.get(pair.target_col))
        else {
            return Err(DciError::Shape(format!(
                "candidate pair ({}, {}) is outside the domain vocabularies",
                pair.source_col, pair.target_col
            )));
        };
        if sdf < config.phi || tdf < config.phi {
            continue;
        }
        if config.cross_consistency {
            let rs = sdf as f64 / source_docs;
            let rt = tdf as f64 / target_docs;
            if !prevalence_consistent(rs, rt, config.max_prevalence_ratio) {
                inconsistent += 1;
                continue;
            }
        }
        scored.push(Pivot {
            source_col: pair.source_col,
            target_col: pair.target_col,
            score: gains[pair.source_col],
        });
    }

    let survivors = scored.len();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.source_col.cmp(&b.source_col))
            .then(a.target_col.cmp(&b.target_col))
    });

    let mut selected: Vec<Pivot> = Vec::with_capacity(config.npivots.min(survivors));
    for p in scored {
        if selected.len() == config.npivots {
            break;
        }
        let reused = selected
            .iter()
            .any(|q| q.source_col == p.source_col || q.target_col == p.target_col);
        if !reused {
            selected.push(p);
        }
    }

    if selected.is_empty() {
        return Err(DciError::NoPivotsAvailable(format!(
            "none of {} aligned candidates reached phi={} in both domains{}",
            candidates.len(),
            config.phi,
            if config.cross_consistency {
                format!(" with consistent prevalence ({} rejected)", inconsistent)
            } else {
                String::new()
            }
        )));
    }
    if selected.len() < config.npivots {
        tracing::warn!(
            "Only {} pivots available ({} requested)",
            selected.len(),
            config.npivots
        );
    }
    tracing::info!(
        "Selected {} pivots from {} candidates ({} passed frequency filters, {} inconsistent)",
        selected.len(),
        candidates.len(),
        survivors,
        inconsistent
    );

    Ok(PivotSet::new(selected))
}

/// `select_pivots` plus its wall-clock duration.
pub fn select_pivots_timed(
    candidates: &[AlignedPair],
    source: &Domain,
    target: &Domain,
    config: &PivotSelectionConfig,
) -> Result<(PivotSet, Duration), DciError> {
    let start = Instant::now();
    let pivots = select_pivots(candidates, source, target, config)?;
    Ok((pivots, start.elapsed()))
}

/// Whether two relative document frequencies are within `max_ratio` of each other.
fn prevalence_consistent(rs: f64, rt: f64, max_ratio: f64) -> bool {
    let (lo, hi) = if rs < rt { (rs, rt) } else { (rt, rs) };
    if lo <= 0.0 {
        return false;
    }
    hi / lo <= max_ratio
}

/// Information gain (bits) between each column's presence and the label.
pub fn information_gain(x: &SparseMatrix, y: &[Label]) -> Vec<f64> {
    let n = x.n_rows();
    let mut gains = vec![0.0; x.n_cols()];
    if n == 0 {
        return gains;
    }

    let mut present_pos = vec![0usize; x.n_cols()];
    let mut present_neg = vec![0usize; x.n_cols()];
    for (r, &label) in y.iter().enumerate().take(n) {
        let counts = if label == 1 {
            &mut present_pos
        } else {
            &mut present_neg
        };
        for &c in x.row_indices(r) {
            counts[c] += 1;
        }
    }
    let n_pos = y.iter().take(n).filter(|&&l| l == 1).count();
    let n_neg = n - n_pos;

    let nf = n as f64;
    for (c, gain) in gains.iter_mut().enumerate() {
        let tp = present_pos[c];
        let fp = present_neg[c];
        let cells = [
            (tp, tp + fp, n_pos),
            (fp, tp + fp, n_neg),
            (n_pos - tp, n - tp - fp, n_pos),
            (n_neg - fp, n - tp - fp, n_neg),
        ];
        *gain = cells
            .iter()
            .filter(|(joint, _, _)| *joint > 0)
            .map(|&(joint, term_marginal, class_marginal)| {
                let pj = joint as f64 / nf;
                let pt = term_marginal as f64 / nf;
                let pc = class_marginal as f64 / nf;
                pj * (pj / (pt * pc)).log2()
            })
            .sum();
    }
    gains
}
