// crates/dci-cli/src/commands/args.rs
//
// Argument groups shared by the run subcommands, and their merge into
// `RunParams`. Flags given on the command line override the config file.

use std::path::PathBuf;

use clap::Args;

use dci_core::DciError;
use dci_pipeline::RunParams;
use dci_transform::{Dcf, Standardization};

/// Labeled corpora (CSV: text, label).
#[derive(Debug, Clone, Default, Args)]
pub struct CorpusArgs {
    /// Labeled source training corpus.
    #[arg(long)]
    pub source_train: Option<PathBuf>,

    /// Labeled target corpus to predict and evaluate.
    #[arg(long)]
    pub target_test: Option<PathBuf>,
}

/// Unlabeled corpora (CSV: text).
#[derive(Debug, Clone, Default, Args)]
pub struct UnlabeledArgs {
    /// Unlabeled source corpus.
    #[arg(long)]
    pub source_unlabeled: Option<PathBuf>,

    /// Unlabeled target corpus.
    #[arg(long)]
    pub target_unlabeled: Option<PathBuf>,
}

/// Translation dictionary (CSV: source term, target term).
#[derive(Debug, Clone, Default, Args)]
pub struct DictionaryArgs {
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
}

/// DCI and classifier options.
#[derive(Debug, Clone, Default, Args)]
pub struct DciArgs {
    /// Correspondence function: cosine, pmi or linear.
    #[arg(long)]
    pub dcf: Option<Dcf>,

    /// Number of pivots to select.
    #[arg(long)]
    pub npivots: Option<usize>,

    /// Minimum pivot document frequency in each domain.
    #[arg(long)]
    pub phi: Option<usize>,

    /// Standardization of the projected spaces: none or normal.
    #[arg(long)]
    pub standardization: Option<Standardization>,

    /// Search the classifier's C by stratified cross-validation.
    #[arg(long)]
    pub optimize: bool,

    /// Pool source and target correspondence profiles.
    #[arg(long)]
    pub unify: bool,

    /// Reject pivots with inconsistent prevalence across domains.
    #[arg(long)]
    pub cross_consistency: bool,

    /// Decision threshold on classifier scores.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Directory for predictions.csv, report.txt and status.txt.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Start from the config file (if any) and apply command-line overrides.
pub fn merge_params(
    base: Option<RunParams>,
    corpus: &CorpusArgs,
    unlabeled: &UnlabeledArgs,
    dictionary: &DictionaryArgs,
    dci: &DciArgs,
) -> Result<RunParams, DciError> {
    let mut params = match base {
        Some(mut params) => {
            if let Some(path) = &corpus.source_train {
                params.source_train = path.clone();
            }
            if let Some(path) = &corpus.target_test {
                params.target_test = path.clone();
            }
            params
        }
        None => {
            let source_train = corpus.source_train.clone().ok_or_else(|| {
                DciError::Config("--source-train is required without --config".to_string())
            })?;
            let target_test = corpus.target_test.clone().ok_or_else(|| {
                DciError::Config("--target-test is required without --config".to_string())
            })?;
            RunParams::new(source_train, target_test)
        }
    };

    if unlabeled.source_unlabeled.is_some() {
        params.source_unlabeled = unlabeled.source_unlabeled.clone();
    }
    if unlabeled.target_unlabeled.is_some() {
        params.target_unlabeled = unlabeled.target_unlabeled.clone();
    }
    if dictionary.dictionary.is_some() {
        params.dictionary = dictionary.dictionary.clone();
    }

    if let Some(dcf) = dci.dcf {
        params.dcf = dcf;
    }
    if let Some(npivots) = dci.npivots {
        params.npivots = npivots;
    }
    if let Some(phi) = dci.phi {
        params.phi = phi;
    }
    if let Some(standardization) = dci.standardization {
        params.standardization = standardization;
    }
    params.optimize |= dci.optimize;
    params.unify |= dci.unify;
    params.cross_consistency |= dci.cross_consistency;
    if let Some(threshold) = dci.threshold {
        params.threshold = threshold;
    }
    if let Some(dir) = &dci.output_dir {
        params.output_dir = dir.clone();
    }
    Ok(params)
}
