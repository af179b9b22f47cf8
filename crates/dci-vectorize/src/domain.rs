// crates/dci-vectorize/src/domain.rs
//
// Assemble a `Domain` from raw labeled and unlabeled documents.
//
// The source vocabulary is bounded to the labeled documents (the training
// set). The target vocabulary is learned from labeled + unlabeled documents,
// since the target's labeled documents are only seen at evaluation time.

use dci_core::{DciError, Domain, Label, RowAccess};

use crate::builder::{VectorSpaceBuilder, Weighting};

/// Builder for one domain's matrices.
#[derive(Debug, Clone)]
pub struct DomainBuilder {
    name: String,
    language: String,
    is_source: bool,
    min_df: usize,
    weighting: Weighting,
}

impl DomainBuilder {
    /// A TF-IDF, `min_df = 1` builder for a target-side domain.
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            is_source: false,
            min_df: 1,
            weighting: Weighting::TfIdf,
        }
    }

    /// Mark the domain as the labeled source (vocabulary from labeled docs only).
    pub fn with_source(mut self, is_source: bool) -> Self {
        self.is_source = is_source;
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Vectorize the corpora: `U` covers labeled followed by unlabeled
    /// documents, `X` covers the labeled documents only.
    pub fn build(
        &self,
        labeled: &[String],
        labels: Vec<Label>,
        unlabeled: &[String],
    ) -> Result<Domain, DciError> {
        let all: Vec<&str> = labeled
            .iter()
            .chain(unlabeled.iter())
            .map(String::as_str)
            .collect();

        let builder = VectorSpaceBuilder::new(self.weighting).with_min_df(self.min_df);
        let space = if self.is_source {
            let vocabulary = VectorSpaceBuilder::new(Weighting::Count)
                .with_min_df(self.min_df)
                .fit(labeled)?
                .into_vocabulary();
            builder.fit_with_vocabulary(vocabulary, &all)
        } else {
            builder.fit(&all)?
        };

        let u = space.transform(&all)?;
        let x = space.transform(labeled)?;
        tracing::info!(
            "Domain '{}': {} labeled, {} total documents, {} terms",
            self.name,
            x.n_rows(),
            u.n_rows(),
            space.vocabulary().len()
        );

        Domain::new(
            self.name.clone(),
            self.language.clone(),
            x,
            labels,
            u,
            space.into_vocabulary(),
        )
    }
}
