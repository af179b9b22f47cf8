// crates/dci-classify/src/search.rs
//
// Cross-validated search over the classifier's regularization constant C.
//
// Folds come from smartcore's unshuffled `KFold`, applied to each class
// separately so every fold keeps the class balance.

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix as LinalgMatrix;
use smartcore::model_selection::{BaseKFold, KFold};

use dci_core::{DciError, DenseMatrix, Label, MarginClassifier};

use crate::linear::{ClassifierParams, LinearClassifier};
use crate::metrics::accuracy;

/// Result of a C search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub best_c: f64,
    pub best_accuracy: f64,
    /// Folds actually used (may be fewer than requested).
    pub folds: usize,
    /// Mean cross-validated accuracy per grid value, in grid order.
    pub scores: Vec<(f64, f64)>,
}

/// Stratified k-fold grid search over C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CSearch {
    pub grid: Vec<f64>,
    pub folds: usize,
    pub threshold: f64,
    pub base: ClassifierParams,
}

impl Default for CSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl CSearch {
    /// C in {10^-3, ..., 10^3}, 5 folds, threshold 0.5.
    pub fn new() -> Self {
        Self {
            grid: (-3..=3).map(|e| 10f64.powi(e)).collect(),
            folds: 5,
            threshold: 0.5,
            base: ClassifierParams::default(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Evaluate every grid value and keep the best mean accuracy. Ties keep
    /// the smaller C.
    ///
    /// The fold count is reduced to the size of the smallest class. If that
    /// leaves fewer than two folds the search is skipped and the base C is
    /// returned.
    pub fn search(&self, x: &DenseMatrix, y: &[Label]) -> Result<SearchOutcome, DciError> {
        if self.grid.is_empty() {
            return Err(DciError::Config("empty C grid".to_string()));
        }
        let smallest_class = [0, 1]
            .iter()
            .map(|&l| y.iter().filter(|&&v| v == l).count())
            .min()
            .unwrap_or(0);
        let k = self.folds.min(smallest_class);
        if k < 2 {
            tracing::warn!(
                "Smallest class has {} examples; skipping C search and using C={}",
                smallest_class,
                self.base.c
            );
            return Ok(SearchOutcome {
                best_c: self.base.c,
                best_accuracy: f64::NAN,
                folds: k,
                scores: Vec::new(),
            });
        }

        let folds = stratified_folds(y, k);
        let mut grid = self.grid.clone();
        grid.sort_by(f64::total_cmp);

        let mut scores = Vec::with_capacity(grid.len());
        for &c in &grid {
            let mut total = 0.0;
            for held_out in &folds {
                let train: Vec<usize> = (0..y.len()).filter(|i| !held_out.contains(i)).collect();
                let train_y: Vec<Label> = train.iter().map(|&i| y[i]).collect();
                let test_y: Vec<Label> = held_out.iter().map(|&i| y[i]).collect();

                let mut clf = LinearClassifier::new(ClassifierParams { c });
                clf.fit(&x.select_rows(&train), &train_y)?;
                let predicted: Vec<Label> = clf
                    .predict_scores(&x.select_rows(held_out))?
                    .into_iter()
                    .map(|s| (s > self.threshold) as Label)
                    .collect();
                total += accuracy(&test_y, &predicted)?;
            }
            let mean = total / k as f64;
            tracing::debug!("C={}: mean accuracy {:.4} over {} folds", c, mean, k);
            scores.push((c, mean));
        }

        let (best_c, best_accuracy) = scores
            .iter()
            .copied()
            .fold((grid[0], f64::NEG_INFINITY), |best, (c, acc)| {
                if acc > best.1 {
                    (c, acc)
                } else {
                    best
                }
            });
        tracing::info!(
            "C search: best C={} (accuracy {:.4}, {} folds)",
            best_c,
            best_accuracy,
            k
        );
        Ok(SearchOutcome {
            best_c,
            best_accuracy,
            folds: k,
            scores,
        })
    }
}

/// Split row indices into `k` folds preserving the class balance.
///
/// The members of each class, in row order, are cut into `k` contiguous
/// blocks and block `i` of every class joins fold `i`. A class with fewer
/// than `k` members is dealt one row per fold. Every returned fold is sorted.
pub fn stratified_folds(y: &[Label], k: usize) -> Vec<Vec<usize>> {
    let k = k.max(1);
    let mut folds = vec![Vec::new(); k];
    for class in [0, 1] {
        let members: Vec<usize> = (0..y.len()).filter(|&i| y[i] == class).collect();
        if members.len() < k.max(2) {
            for (n, &i) in members.iter().enumerate() {
                folds[n % k].push(i);
            }
            continue;
        }
        let placeholder = LinalgMatrix::new(members.len(), 1, vec![0.0f64; members.len()], false);
        let splitter = KFold::default().with_n_splits(k).with_shuffle(false);
        for (fold, (_, test)) in folds.iter_mut().zip(splitter.split(&placeholder)) {
            fold.extend(test.into_iter().map(|pos| members[pos]));
        }
    }
    for fold in &mut folds {
        fold.sort_unstable();
    }
    folds
}
