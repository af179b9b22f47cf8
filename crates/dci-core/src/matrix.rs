// crates/dci-core/src/matrix.rs
//
// Sparse (CSR) and dense (smartcore-backed) matrices used throughout the pipeline.
//
// Term-document matrices are sparse: rows are documents, columns are
// vocabulary terms. Correspondence profiles and projected spaces are dense.
// Both expose the `RowAccess` capability so projection does not care which
// representation it is handed.

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix as LinalgMatrix;

use crate::error::DciError;

/// Row-oriented read access shared by sparse and dense matrices.
pub trait RowAccess {
    /// Number of rows.
    fn n_rows(&self) -> usize;

    /// Number of columns.
    fn n_cols(&self) -> usize;

    /// Visit every stored `(column, value)` entry of a row in column order.
    fn for_each_in_row<F: FnMut(usize, f64)>(&self, row: usize, f: F);

    /// Weighted aggregation of `basis` rows: `Σ_c self[row, c] * basis[c]`.
    ///
    /// `basis` must have one row per column of `self`.
    fn weighted_row_sum(&self, row: usize, basis: &DenseMatrix) -> Vec<f64> {
        let mut acc = vec![0.0; basis.n_cols()];
        self.for_each_in_row(row, |col, weight| {
            if weight != 0.0 {
                for (j, a) in acc.iter_mut().enumerate() {
                    *a += weight * basis.get(col, j);
                }
            }
        });
        acc
    }
}

/// Compressed sparse row matrix of non-negative term weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl SparseMatrix {
    /// Build from per-row `(column, value)` lists.
    ///
    /// Entries within a row are sorted by column, duplicate columns are
    /// summed, and explicit zeros are dropped. Fails if any column index is
    /// out of range or any value is negative or not finite.
    pub fn from_rows(cols: usize, rows: Vec<Vec<(usize, f64)>>) -> Result<Self, DciError> {
        let n_rows = rows.len();
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        for (r, mut entries) in rows.into_iter().enumerate() {
            entries.sort_by_key(|&(c, _)| c);
            let mut last: Option<usize> = None;
            for (c, v) in entries {
                if c >= cols {
                    return Err(DciError::Shape(format!(
                        "row {} references column {} but matrix has {} columns",
                        r, c, cols
                    )));
                }
                if !v.is_finite() || v < 0.0 {
                    return Err(DciError::Shape(format!(
                        "row {} column {} holds {}, expected a finite non-negative weight",
                        r, c, v
                    )));
                }
                if last == Some(c) {
                    if let Some(d) = data.last_mut() {
                        *d += v;
                    }
                } else {
                    indices.push(c);
                    data.push(v);
                    last = Some(c);
                }
            }
            // Drop explicit zeros.
            let start = indptr[r];
            let mut write = start;
            for read in start..indices.len() {
                if data[read] != 0.0 {
                    indices[write] = indices[read];
                    data[write] = data[read];
                    write += 1;
                }
            }
            indices.truncate(write);
            data.truncate(write);
            indptr.push(indices.len());
        }

        Ok(Self {
            rows: n_rows,
            cols,
            indptr,
            indices,
            data,
        })
    }

    /// Build from a dense row-major slice of rows (test and small-input helper).
    pub fn from_dense(rows: &[Vec<f64>]) -> Result<Self, DciError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut lists = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(DciError::Shape(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            lists.push(row.iter().copied().enumerate().collect());
        }
        Self::from_rows(cols, lists)
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Column indices stored in a row.
    pub fn row_indices(&self, row: usize) -> &[usize] {
        &self.indices[self.indptr[row]..self.indptr[row + 1]]
    }

    /// Values stored in a row, aligned with `row_indices`.
    pub fn row_values(&self, row: usize) -> &[f64] {
        &self.data[self.indptr[row]..self.indptr[row + 1]]
    }

    /// Value at `(row, col)`, zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let idx = self.row_indices(row);
        match idx.binary_search(&col) {
            Ok(pos) => self.row_values(row)[pos],
            Err(_) => 0.0,
        }
    }

    /// Number of rows in which each column has a non-zero entry.
    pub fn document_frequencies(&self) -> Vec<usize> {
        let mut df = vec![0usize; self.cols];
        for &c in &self.indices {
            df[c] += 1;
        }
        df
    }

    /// Column-major view: for every column, its `(row, value)` entries in row order.
    pub fn column_postings(&self) -> Vec<Vec<(usize, f64)>> {
        let mut postings = vec![Vec::new(); self.cols];
        for r in 0..self.rows {
            for (&c, &v) in self.row_indices(r).iter().zip(self.row_values(r)) {
                postings[c].push((r, v));
            }
        }
        postings
    }
}

impl RowAccess for SparseMatrix {
    fn n_rows(&self) -> usize {
        self.rows
    }

    fn n_cols(&self) -> usize {
        self.cols
    }

    fn for_each_in_row<F: FnMut(usize, f64)>(&self, row: usize, mut f: F) {
        for (&c, &v) in self.row_indices(row).iter().zip(self.row_values(row)) {
            f(c, v);
        }
    }
}

/// Dense matrix of reals backed by a row-major smartcore matrix.
///
/// Profiles, projected spaces and classifier inputs all use this type, so
/// the classifier receives its training matrix without conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "DenseRows", try_from = "DenseRows")]
pub struct DenseMatrix {
    inner: LinalgMatrix<f64>,
}

/// Serialized form of [`DenseMatrix`]: the column count plus every row.
#[derive(Serialize, Deserialize)]
struct DenseRows {
    cols: usize,
    rows: Vec<Vec<f64>>,
}

impl DenseMatrix {
    /// An all-zero matrix with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            inner: LinalgMatrix::new(rows, cols, vec![0.0; rows * cols], false),
        }
    }

    /// Stack equally long rows. An empty input yields a 0x`cols` matrix.
    pub fn from_rows(cols: usize, rows: Vec<Vec<f64>>) -> Result<Self, DciError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(DciError::Shape(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            inner: LinalgMatrix::new(n, cols, data, false),
        })
    }

    /// The backing smartcore matrix.
    pub fn as_linalg(&self) -> &LinalgMatrix<f64> {
        &self.inner
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        *self.inner.get((row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner.set((row, col), value);
    }

    /// A copy of one row.
    pub fn row(&self, row: usize) -> Vec<f64> {
        (0..self.n_cols()).map(|c| self.get(row, c)).collect()
    }

    /// Every entry in row-major order.
    pub fn values(&self) -> Vec<f64> {
        (0..self.n_rows()).flat_map(|r| self.row(r)).collect()
    }

    /// The sub-matrix made of the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> DenseMatrix {
        let cols = self.n_cols();
        let data: Vec<f64> = rows.iter().flat_map(|&r| self.row(r)).collect();
        DenseMatrix {
            inner: LinalgMatrix::new(rows.len(), cols, data, false),
        }
    }

    /// Per-column arithmetic mean. Zero rows yields zeros.
    pub fn column_means(&self) -> Vec<f64> {
        let (rows, cols) = (self.n_rows(), self.n_cols());
        if rows == 0 {
            return vec![0.0; cols];
        }
        (0..cols)
            .map(|c| (0..rows).map(|r| self.get(r, c)).sum::<f64>() / rows as f64)
            .collect()
    }

    /// Per-column population variance (divisor `n`).
    pub fn column_variances(&self) -> Vec<f64> {
        let rows = self.n_rows();
        if rows == 0 {
            return vec![0.0; self.n_cols()];
        }
        self.column_means()
            .into_iter()
            .enumerate()
            .map(|(c, m)| {
                (0..rows)
                    .map(|r| {
                        let d = self.get(r, c) - m;
                        d * d
                    })
                    .sum::<f64>()
                    / rows as f64
            })
            .collect()
    }
}

impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.inner.shape() == other.inner.shape() && self.values() == other.values()
    }
}

impl From<DenseMatrix> for DenseRows {
    fn from(m: DenseMatrix) -> Self {
        DenseRows {
            cols: m.n_cols(),
            rows: (0..m.n_rows()).map(|r| m.row(r)).collect(),
        }
    }
}

impl TryFrom<DenseRows> for DenseMatrix {
    type Error = DciError;

    fn try_from(rows: DenseRows) -> Result<Self, Self::Error> {
        DenseMatrix::from_rows(rows.cols, rows.rows)
    }
}

impl RowAccess for DenseMatrix {
    fn n_rows(&self) -> usize {
        self.inner.shape().0
    }

    fn n_cols(&self) -> usize {
        self.inner.shape().1
    }

    fn for_each_in_row<F: FnMut(usize, f64)>(&self, row: usize, mut f: F) {
        for c in 0..self.n_cols() {
            f(c, self.get(row, c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix {
        SparseMatrix::from_rows(
            4,
            vec![
                vec![(2, 1.0), (0, 2.0)],
                vec![],
                vec![(1, 3.0), (1, 1.0), (3, 0.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn from_rows_sorts_merges_and_drops_zeros() {
        let m = sample();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.n_cols(), 4);
        assert_eq!(m.row_indices(0), &[0, 2]);
        assert_eq!(m.row_values(0), &[2.0, 1.0]);
        assert!(m.row_indices(1).is_empty());
        assert_eq!(m.row_indices(2), &[1]);
        assert_eq!(m.row_values(2), &[4.0]);
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn out_of_range_column_is_rejected() {
        let err = SparseMatrix::from_rows(2, vec![vec![(5, 1.0)]]).unwrap_err();
        assert!(matches!(err, DciError::Shape(_)));
    }

    #[test]
    fn negative_or_non_finite_weights_are_rejected() {
        let err = SparseMatrix::from_rows(2, vec![vec![(0, 1.0)], vec![(1, -0.5)]]).unwrap_err();
        assert!(matches!(err, DciError::Shape(_)));
        assert!(SparseMatrix::from_dense(&[vec![f64::NAN]]).is_err());
    }

    #[test]
    fn document_frequencies_count_rows() {
        let m = SparseMatrix::from_dense(&[
            vec![1.0, 0.0, 2.0],
            vec![1.0, 1.0, 0.0],
            vec![0.0, 0.0, 5.0],
        ])
        .unwrap();
        assert_eq!(m.document_frequencies(), vec![2, 1, 2]);
    }

    #[test]
    fn column_postings_are_row_ordered() {
        let m = sample();
        let postings = m.column_postings();
        assert_eq!(postings[0], vec![(0, 2.0)]);
        assert_eq!(postings[1], vec![(2, 4.0)]);
        assert!(postings[3].is_empty());
    }

    #[test]
    fn weighted_row_sum_combines_basis_rows() {
        let m = SparseMatrix::from_dense(&[vec![2.0, 0.0, 1.0]]).unwrap();
        let basis = DenseMatrix::from_rows(
            2,
            vec![vec![1.0, 0.5], vec![9.0, 9.0], vec![-1.0, 2.0]],
        )
        .unwrap();
        assert_eq!(m.weighted_row_sum(0, &basis), vec![1.0, 3.0]);
    }

    #[test]
    fn dense_shape_mismatch_is_rejected() {
        assert!(DenseMatrix::from_rows(2, vec![vec![1.0, 2.0], vec![1.0]]).is_err());
    }

    #[test]
    fn dense_rows_round_through_the_backing_matrix() {
        let mut m = DenseMatrix::zeros(2, 3);
        m.set(1, 2, 4.0);
        m.set(0, 0, -1.0);
        assert_eq!(m.row(0), vec![-1.0, 0.0, 0.0]);
        assert_eq!(m.row(1), vec![0.0, 0.0, 4.0]);
        assert_eq!(m.as_linalg().shape(), (2, 3));
        assert_eq!(m.values(), vec![-1.0, 0.0, 0.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn dense_serializes_as_rows() {
        let m = DenseMatrix::from_rows(2, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"cols":2,"rows":[[1.0,2.0],[3.0,4.0]]}"#);
        let back: DenseMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn column_statistics() {
        let m = DenseMatrix::from_rows(2, vec![vec![1.0, 10.0], vec![3.0, 10.0]]).unwrap();
        assert_eq!(m.column_means(), vec![2.0, 10.0]);
        assert_eq!(m.column_variances(), vec![1.0, 0.0]);
    }

    #[test]
    fn select_rows_keeps_requested_order() {
        let d = DenseMatrix::from_rows(1, vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let s = d.select_rows(&[2, 0, 2]);
        assert_eq!(s.n_rows(), 3);
        assert_eq!(s.values(), vec![3.0, 1.0, 3.0]);
    }
}
