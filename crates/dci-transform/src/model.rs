// crates/dci-transform/src/model.rs
//
// The DCI model: correspondence profiles for both domains, optional
// unification, projection, optional standardization.

use serde::{Deserialize, Serialize};

use dci_core::{DciError, DenseMatrix, Domain, PivotSet, RowAccess, SparseMatrix};

use crate::align::AlignedPair;
use crate::correspondence::{compute_profile, CorrespondenceProfile};
use crate::dcf::Dcf;
use crate::projection::project;
use crate::standardize::{Standardization, Standardizer};
use crate::unify::unify_profiles;

/// Configuration of the DCI transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DciConfig {
    /// Correspondence function. Default: cosine.
    pub dcf: Dcf,
    /// Pool source and target profiles over aligned terms. Default: false.
    pub unify: bool,
    /// Post-projection standardization. Default: none.
    pub standardization: Standardization,
}

impl Default for DciConfig {
    fn default() -> Self {
        Self {
            dcf: Dcf::Cosine,
            unify: false,
            standardization: Standardization::None,
        }
    }
}

/// Correspondence profiles of the two domains over one pivot set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DciProfiles {
    pub source: CorrespondenceProfile,
    pub target: CorrespondenceProfile,
}

/// Source and target documents in the shared pivot space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPair {
    pub source: DenseMatrix,
    pub target: DenseMatrix,
}

/// Distributional Correspondence Indexing.
#[derive(Debug, Clone, Default)]
pub struct Dci {
    pub config: DciConfig,
}

impl Dci {
    pub fn new(config: DciConfig) -> Self {
        Self { config }
    }

    /// Compute both domains' profiles from their unlabeled matrices and,
    /// if configured, pool them over `alignment`.
    pub fn fit(
        &self,
        source: &Domain,
        target: &Domain,
        pivots: &PivotSet,
        alignment: &[AlignedPair],
    ) -> Result<DciProfiles, DciError> {
        if pivots.is_empty() {
            return Err(DciError::NoPivotsAvailable(
                "cannot build a correspondence space from an empty pivot set".to_string(),
            ));
        }
        let source_profile = compute_profile(source.u(), &pivots.source_cols(), self.config.dcf)?;
        let target_profile = compute_profile(target.u(), &pivots.target_cols(), self.config.dcf)?;

        let degenerate = source_profile.degenerate_entries + target_profile.degenerate_entries;
        if degenerate > 0 {
            tracing::info!(
                "{} profile entries had no co-occurrence and were floored",
                degenerate
            );
        }

        if self.config.unify {
            let (source, target) = unify_profiles(&source_profile, &target_profile, alignment)?;
            Ok(DciProfiles { source, target })
        } else {
            Ok(DciProfiles {
                source: source_profile,
                target: target_profile,
            })
        }
    }

    /// Project the given source and target matrices and, if configured,
    /// standardize both with statistics from the projected source.
    pub fn transform(
        &self,
        profiles: &DciProfiles,
        source_x: &SparseMatrix,
        target_x: &SparseMatrix,
    ) -> Result<ProjectedPair, DciError> {
        let source = project(source_x, &profiles.source.matrix)?;
        let target = project(target_x, &profiles.target.matrix)?;

        match self.config.standardization {
            Standardization::None => Ok(ProjectedPair { source, target }),
            Standardization::Normal => {
                let scaler = Standardizer::fit(&source);
                Ok(ProjectedPair {
                    source: scaler.transform(&source)?,
                    target: scaler.transform(&target)?,
                })
            }
        }
    }

    /// `fit` followed by `transform` of both domains' labeled matrices.
    pub fn fit_transform(
        &self,
        source: &Domain,
        target: &Domain,
        pivots: &PivotSet,
        alignment: &[AlignedPair],
    ) -> Result<ProjectedPair, DciError> {
        let profiles = self.fit(source, target, pivots, alignment)?;
        let projected = self.transform(&profiles, source.x(), target.x())?;
        tracing::debug!(
            "Projected {} source and {} target documents into {} pivot dimensions",
            projected.source.n_rows(),
            projected.target.n_rows(),
            projected.source.n_cols()
        );
        Ok(projected)
    }
}
