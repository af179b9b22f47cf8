// crates/dci-pipeline/src/params.rs
//
// Run parameters for a cross-domain DCI run.
// Loaded from a TOML file or assembled by the CLI, with per-field defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dci_core::DciError;
use dci_transform::{Dcf, DciConfig, PivotSelectionConfig, Standardization};
use dci_vectorize::Weighting;

/// Which inputs a run shape expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    /// Translation dictionary plus labeled corpora; unlabeled corpora optional.
    Full,
    /// Same language on both sides: no dictionary.
    NoDict,
    /// Labeled corpora and dictionary only: no unlabeled corpora.
    NoUnlabeled,
}

/// Parameters of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    /// Labeled source corpus (CSV: text, label).
    pub source_train: PathBuf,

    /// Unlabeled source corpus (CSV: text). Absent means a single empty document.
    #[serde(default)]
    pub source_unlabeled: Option<PathBuf>,

    /// Labeled target corpus used for evaluation (CSV: text, label).
    pub target_test: PathBuf,

    /// Unlabeled target corpus (CSV: text).
    #[serde(default)]
    pub target_unlabeled: Option<PathBuf>,

    /// Translation dictionary (CSV: source term, target term).
    #[serde(default)]
    pub dictionary: Option<PathBuf>,

    /// Correspondence function: "cosine", "pmi" or "linear".
    #[serde(default = "default_dcf")]
    pub dcf: Dcf,

    /// Requested number of pivots.
    #[serde(default = "default_npivots")]
    pub npivots: usize,

    /// Minimum pivot document frequency in each domain's unlabeled matrix.
    #[serde(default = "default_phi")]
    pub phi: usize,

    /// Post-projection standardization: "none" or "normal".
    #[serde(default)]
    pub standardization: Standardization,

    /// Cross-validated search over the classifier's C.
    #[serde(default)]
    pub optimize: bool,

    /// Pool source and target correspondence profiles.
    #[serde(default)]
    pub unify: bool,

    /// Reject pivots with inconsistent prevalence across domains.
    #[serde(default)]
    pub cross_consistency: bool,

    /// Largest tolerated prevalence ratio under cross-consistency.
    #[serde(default = "default_max_prevalence_ratio")]
    pub max_prevalence_ratio: f64,

    /// Minimum document frequency of vocabulary terms.
    #[serde(default = "default_min_df")]
    pub min_df: usize,

    /// Term weighting: "tfidf" or "count".
    #[serde(default = "default_weighting")]
    pub weighting: Weighting,

    /// Scores above this are predicted as the second label.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Directory receiving predictions.csv and report.txt.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_dcf() -> Dcf {
    Dcf::Cosine
}

fn default_npivots() -> usize {
    450
}

fn default_phi() -> usize {
    30
}

fn default_max_prevalence_ratio() -> f64 {
    5.0
}

fn default_min_df() -> usize {
    1
}

fn default_weighting() -> Weighting {
    Weighting::TfIdf
}

fn default_threshold() -> f64 {
    0.5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl RunParams {
    /// Parameters with every option at its default.
    pub fn new(source_train: impl Into<PathBuf>, target_test: impl Into<PathBuf>) -> Self {
        Self {
            source_train: source_train.into(),
            source_unlabeled: None,
            target_test: target_test.into(),
            target_unlabeled: None,
            dictionary: None,
            dcf: default_dcf(),
            npivots: default_npivots(),
            phi: default_phi(),
            standardization: Standardization::default(),
            optimize: false,
            unify: false,
            cross_consistency: false,
            max_prevalence_ratio: default_max_prevalence_ratio(),
            min_df: default_min_df(),
            weighting: default_weighting(),
            threshold: default_threshold(),
            output_dir: default_output_dir(),
            log_level: default_log_level(),
        }
    }

    /// Load parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DciError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            DciError::MissingResource(format!("{}: {}", path.display(), e))
        })?;
        let params: RunParams = toml::from_str(&contents)
            .map_err(|e| DciError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(params)
    }

    /// Check the inputs a run shape requires and the numeric ranges.
    pub fn validate(&self, kind: RunKind) -> Result<(), DciError> {
        if self.npivots == 0 {
            return Err(DciError::Config("npivots must be at least 1".to_string()));
        }
        if self.min_df == 0 {
            return Err(DciError::Config("min_df must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(DciError::Config(format!(
                "threshold must lie in [0, 1], got {}",
                self.threshold
            )));
        }
        if !(self.max_prevalence_ratio >= 1.0) {
            return Err(DciError::Config(format!(
                "max_prevalence_ratio must be at least 1, got {}",
                self.max_prevalence_ratio
            )));
        }
        match kind {
            RunKind::Full => {
                if self.dictionary.is_none() {
                    return Err(DciError::Config("full run requires a dictionary".to_string()));
                }
            }
            RunKind::NoDict => {
                if self.dictionary.is_some() {
                    return Err(DciError::Config(
                        "nodict run does not take a dictionary".to_string(),
                    ));
                }
            }
            RunKind::NoUnlabeled => {
                if self.dictionary.is_none() {
                    return Err(DciError::Config(
                        "nounlabeled run requires a dictionary".to_string(),
                    ));
                }
                if self.source_unlabeled.is_some() || self.target_unlabeled.is_some() {
                    return Err(DciError::Config(
                        "nounlabeled run does not take unlabeled corpora".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn pivot_config(&self) -> PivotSelectionConfig {
        PivotSelectionConfig {
            npivots: self.npivots,
            phi: self.phi,
            cross_consistency: self.cross_consistency,
            max_prevalence_ratio: self.max_prevalence_ratio,
        }
    }

    pub fn dci_config(&self) -> DciConfig {
        DciConfig {
            dcf: self.dcf,
            unify: self.unify,
            standardization: self.standardization,
        }
    }
}
