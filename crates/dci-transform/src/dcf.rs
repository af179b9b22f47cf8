// crates/dci-transform/src/dcf.rs
//
// Distributional correspondence functions.
//
// Each function maps the co-occurrence statistics of one (term, pivot) pair,
// gathered over a domain's unlabeled matrix, to a single real number. The
// `Dcf` enum is the configuration-facing selector; each variant is backed by
// one `CorrespondenceFunction` implementation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selector for the correspondence function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dcf {
    /// Cosine between weight columns, in [-1, 1].
    Cosine,
    /// Pointwise mutual information of binary occurrence, 0 meaning independence.
    Pmi,
    /// Fraction of documents containing both terms.
    Linear,
}

impl Dcf {
    /// The strategy implementing this function.
    pub fn function(&self) -> Box<dyn CorrespondenceFunction> {
        match self {
            Dcf::Cosine => Box::new(CosineDcf),
            Dcf::Pmi => Box::new(PmiDcf::default()),
            Dcf::Linear => Box::new(LinearDcf),
        }
    }
}

impl fmt::Display for Dcf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dcf::Cosine => write!(f, "cosine"),
            Dcf::Pmi => write!(f, "pmi"),
            Dcf::Linear => write!(f, "linear"),
        }
    }
}

/// Returned when parsing an unknown correspondence function name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown correspondence function '{0}' (expected cosine, pmi or linear)")]
pub struct UnknownDcf(pub String);

impl FromStr for Dcf {
    type Err = UnknownDcf;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Dcf::Cosine),
            "pmi" => Ok(Dcf::Pmi),
            "linear" => Ok(Dcf::Linear),
            _ => Err(UnknownDcf(s.to_string())),
        }
    }
}

/// Co-occurrence statistics of one (term, pivot) pair over `n_docs` documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairStatistics {
    /// Σ_d w(term, d) · w(pivot, d).
    pub dot: f64,
    /// L2 norm of the term's weight column.
    pub term_norm: f64,
    /// L2 norm of the pivot's weight column.
    pub pivot_norm: f64,
    /// Documents in which both occur.
    pub cooccurrences: usize,
    /// Documents in which the term occurs.
    pub term_df: usize,
    /// Documents in which the pivot occurs.
    pub pivot_df: usize,
    /// Documents in the unlabeled matrix.
    pub n_docs: usize,
}

/// One correspondence function.
pub trait CorrespondenceFunction: Send + Sync {
    /// The selector this strategy implements.
    fn dcf(&self) -> Dcf;

    /// Correspondence of one pair, or `None` where the measure is undefined.
    fn correspond(&self, stats: &PairStatistics) -> Option<f64>;

    /// Value substituted where `correspond` is undefined.
    fn floor(&self) -> f64 {
        0.0
    }
}

/// Cosine similarity of the term and pivot weight columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineDcf;

impl CorrespondenceFunction for CosineDcf {
    fn dcf(&self) -> Dcf {
        Dcf::Cosine
    }

    fn correspond(&self, stats: &PairStatistics) -> Option<f64> {
        if stats.term_norm == 0.0 || stats.pivot_norm == 0.0 {
            return Some(0.0);
        }
        Some((stats.dot / (stats.term_norm * stats.pivot_norm)).clamp(-1.0, 1.0))
    }
}

/// Pointwise mutual information, `log2(P(t,p) / (P(t) P(p)))`.
#[derive(Debug, Clone, Copy)]
pub struct PmiDcf {
    /// Substitute for pairs that never co-occur.
    pub floor: f64,
}

impl Default for PmiDcf {
    fn default() -> Self {
        Self { floor: 0.0 }
    }
}

impl CorrespondenceFunction for PmiDcf {
    fn dcf(&self) -> Dcf {
        Dcf::Pmi
    }

    fn correspond(&self, stats: &PairStatistics) -> Option<f64> {
        if stats.cooccurrences == 0 || stats.term_df == 0 || stats.pivot_df == 0 {
            return None;
        }
        let n = stats.n_docs as f64;
        let joint = stats.cooccurrences as f64 / n;
        let p_term = stats.term_df as f64 / n;
        let p_pivot = stats.pivot_df as f64 / n;
        Some((joint / (p_term * p_pivot)).log2())
    }

    fn floor(&self) -> f64 {
        self.floor
    }
}

/// Normalized co-occurrence count.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearDcf;

impl CorrespondenceFunction for LinearDcf {
    fn dcf(&self) -> Dcf {
        Dcf::Linear
    }

    fn correspond(&self, stats: &PairStatistics) -> Option<f64> {
        if stats.n_docs == 0 {
            return Some(0.0);
        }
        Some(stats.cooccurrences as f64 / stats.n_docs as f64)
    }
}
