// crates/dci-transform/src/lib.rs
//
// dci-transform: The Distributional Correspondence Indexing transform.
//
// Terms are redescribed by how strongly they co-occur, across each domain's
// unlabeled corpus, with a shared set of pivot terms. This crate aligns the
// two vocabularies, selects the pivots, computes the per-domain
// correspondence profiles, optionally pools them, projects documents into
// pivot space, and optionally standardizes the result.

pub mod align;
pub mod correspondence;
pub mod dcf;
pub mod model;
pub mod pivots;
pub mod projection;
pub mod standardize;
pub mod unify;

pub use align::{align_vocabularies, AlignedPair, Alignment};
pub use correspondence::{compute_profile, CorrespondenceProfile};
pub use dcf::{CorrespondenceFunction, Dcf, PairStatistics};
pub use model::{Dci, DciConfig, DciProfiles, ProjectedPair};
pub use pivots::{select_pivots, select_pivots_timed, PivotSelectionConfig};
pub use projection::project;
pub use standardize::{Standardization, Standardizer};
pub use unify::unify_profiles;
