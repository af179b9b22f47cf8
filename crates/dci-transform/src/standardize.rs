// crates/dci-transform/src/standardize.rs
//
// Feature-wise z-scoring of projected spaces, fit on the source space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dci_core::{DciError, DenseMatrix, RowAccess};

/// Post-projection standardization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standardization {
    /// Pass-through.
    #[default]
    None,
    /// Zero mean, unit variance per column, with statistics from the source space.
    Normal,
}

impl fmt::Display for Standardization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standardization::None => write!(f, "none"),
            Standardization::Normal => write!(f, "normal"),
        }
    }
}

/// Returned when parsing an unknown standardization name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown standardization '{0}' (expected none or normal)")]
pub struct UnknownStandardization(pub String);

impl FromStr for Standardization {
    type Err = UnknownStandardization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Standardization::None),
            "normal" => Ok(Standardization::Normal),
            _ => Err(UnknownStandardization(s.to_string())),
        }
    }
}

/// Per-column mean and standard deviation learned from one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl Standardizer {
    /// Standard deviations below this are replaced by 1.0.
    pub const EPSILON: f64 = 1e-12;

    /// Learn column statistics (population variance).
    pub fn fit(x: &DenseMatrix) -> Self {
        let means = x.column_means();
        let stds = x
            .column_variances()
            .into_iter()
            .map(|v| {
                let s = v.sqrt();
                if s < Self::EPSILON {
                    1.0
                } else {
                    s
                }
            })
            .collect();
        Self { means, stds }
    }

    /// Apply `(x - mean) / std` column-wise to a fresh copy of `x`.
    pub fn transform(&self, x: &DenseMatrix) -> Result<DenseMatrix, DciError> {
        if x.n_cols() != self.means.len() {
            return Err(DciError::Shape(format!(
                "standardizer fit on {} columns applied to {}",
                self.means.len(),
                x.n_cols()
            )));
        }
        let mut out = x.clone();
        for r in 0..out.n_rows() {
            for (c, (m, s)) in self.means.iter().zip(&self.stds).enumerate() {
                out.set(r, c, (out.get(r, c) - m) / s);
            }
        }
        Ok(out)
    }
}
