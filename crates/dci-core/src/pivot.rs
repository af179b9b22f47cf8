// crates/dci-core/src/pivot.rs
//
// Pivot records: aligned (source, target) column pairs used as the shared
// basis of the correspondence space.

use serde::{Deserialize, Serialize};

/// One pivot concept, present in both domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    /// Column in the source vocabulary.
    pub source_col: usize,
    /// Column in the target vocabulary.
    pub target_col: usize,
    /// Informativeness score measured on the source labeled data.
    pub score: f64,
}

/// Ordered pivots, most informative first.
///
/// No source column and no target column appears more than once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotSet {
    pivots: Vec<Pivot>,
}

impl PivotSet {
    /// Build from an ordered list, dropping any pivot whose source or target
    /// column was already used by an earlier one.
    pub fn new(candidates: Vec<Pivot>) -> Self {
        let mut pivots: Vec<Pivot> = Vec::with_capacity(candidates.len());
        for p in candidates {
            let clash = pivots
                .iter()
                .any(|q| q.source_col == p.source_col || q.target_col == p.target_col);
            if !clash {
                pivots.push(p);
            }
        }
        Self { pivots }
    }

    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pivot> {
        self.pivots.iter()
    }

    /// Source-side pivot columns, in pivot order.
    pub fn source_cols(&self) -> Vec<usize> {
        self.pivots.iter().map(|p| p.source_col).collect()
    }

    /// Target-side pivot columns, in pivot order.
    pub fn target_cols(&self) -> Vec<usize> {
        self.pivots.iter().map(|p| p.target_col).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: usize, t: usize, score: f64) -> Pivot {
        Pivot {
            source_col: s,
            target_col: t,
            score,
        }
    }

    #[test]
    fn keeps_order_and_projects_columns() {
        let set = PivotSet::new(vec![p(3, 7, 0.9), p(1, 2, 0.5)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.source_cols(), vec![3, 1]);
        assert_eq!(set.target_cols(), vec![7, 2]);
    }

    #[test]
    fn reused_columns_are_dropped() {
        let set = PivotSet::new(vec![p(0, 0, 0.9), p(0, 1, 0.8), p(2, 0, 0.7), p(2, 1, 0.6)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.source_cols(), vec![0, 2]);
        assert_eq!(set.target_cols(), vec![0, 1]);
    }
}
