// crates/dci-vectorize/src/lib.rs
//
// dci-vectorize: Turns raw document strings into term-document matrices.
//
// Provides the word tokenizer, a count / TF-IDF vector space builder that can
// fit a vocabulary on one corpus and transform another against it, and the
// domain builder that assembles the labeled and unlabeled matrices of a
// corpus into a `dci_core::Domain`.

pub mod builder;
pub mod domain;
pub mod tokenize;

pub use builder::{FittedVectorSpace, VectorSpaceBuilder, Weighting};
pub use domain::DomainBuilder;
pub use tokenize::tokenize;
