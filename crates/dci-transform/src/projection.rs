// crates/dci-transform/src/projection.rs
//
// Projection of a term-document matrix into pivot space.

use rayon::prelude::*;

use dci_core::{DciError, DenseMatrix, RowAccess};

/// Project every document row of `x` through `profile` (terms × pivots).
///
/// Each projected row is the linear combination of the profile rows of the
/// terms in the document, weighted by the document's term weights. The output
/// keeps the row order and count of `x` and has one column per pivot.
pub fn project<M>(x: &M, profile: &DenseMatrix) -> Result<DenseMatrix, DciError>
where
    M: RowAccess + Sync,
{
    if x.n_cols() != profile.n_rows() {
        return Err(DciError::Shape(format!(
            "matrix has {} term columns but profile covers {} terms",
            x.n_cols(),
            profile.n_rows()
        )));
    }
    let rows: Vec<Vec<f64>> = (0..x.n_rows())
        .into_par_iter()
        .map(|r| x.weighted_row_sum(r, profile))
        .collect();
    DenseMatrix::from_rows(profile.n_cols(), rows)
}
