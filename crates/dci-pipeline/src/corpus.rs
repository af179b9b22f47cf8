// crates/dci-pipeline/src/corpus.rs
//
// CSV corpus loading and the binary label schema.
//
// Labeled corpora have the document text in the first column and the label
// in the second; unlabeled corpora only need the first column. A header row
// is always present and skipped.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use dci_core::{DciError, Label};

/// Stand-in for a missing text cell.
pub const EMPTY_TEXT: &str = "empty text";

/// Documents with their raw label strings, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledCorpus {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl LabeledCorpus {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

pub(crate) fn csv_error(path: &Path, e: csv::Error) -> DciError {
    if e.is_io_error() {
        DciError::MissingResource(format!("{}: {}", path.display(), e))
    } else {
        DciError::Parse(format!("{}: {}", path.display(), e))
    }
}

pub(crate) fn open_csv(path: &Path) -> Result<csv::Reader<File>, DciError> {
    if !path.is_file() {
        return Err(DciError::MissingResource(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))
}

fn text_cell(record: &csv::StringRecord) -> String {
    match record.get(0) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => EMPTY_TEXT.to_string(),
    }
}

/// Load a labeled corpus. Every row needs a non-empty label.
pub fn load_labeled(path: impl AsRef<Path>) -> Result<LabeledCorpus, DciError> {
    let path = path.as_ref();
    let mut reader = open_csv(path)?;
    let mut corpus = LabeledCorpus::default();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let label = match record.get(1).map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => {
                return Err(DciError::InputSchema(format!(
                    "{}: row {} has no label",
                    path.display(),
                    i + 1
                )))
            }
        };
        corpus.texts.push(text_cell(&record));
        corpus.labels.push(label);
    }
    if corpus.is_empty() {
        return Err(DciError::InputSchema(format!(
            "{}: no labeled documents",
            path.display()
        )));
    }
    tracing::info!("Loaded {} labeled documents from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// Load the text column of an unlabeled corpus.
pub fn load_unlabeled(path: impl AsRef<Path>) -> Result<Vec<String>, DciError> {
    let path = path.as_ref();
    let mut reader = open_csv(path)?;
    let mut texts = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        texts.push(text_cell(&record));
    }
    tracing::info!("Loaded {} unlabeled documents from {}", texts.len(), path.display());
    Ok(texts)
}

/// The two class labels of a run, in lexicographic order.
///
/// The first label is encoded as 0, the second as 1 (the positive class).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    names: [String; 2],
}

impl LabelSet {
    /// Derive the label set from the source training labels, which must
    /// contain exactly two distinct values.
    pub fn from_labels(labels: &[String]) -> Result<Self, DciError> {
        let distinct: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
        let mut it = distinct.iter();
        match (it.next(), it.next(), it.next()) {
            (Some(a), Some(b), None) => Ok(Self {
                names: [a.to_string(), b.to_string()],
            }),
            _ => Err(DciError::InputSchema(format!(
                "training data must have two labels, found {}: {:?}",
                distinct.len(),
                distinct
            ))),
        }
    }

    /// Map label strings to 0/1. Labels outside the set are a schema error.
    pub fn encode(&self, labels: &[String]) -> Result<Vec<Label>, DciError> {
        labels
            .iter()
            .map(|l| {
                self.index_of(l).ok_or_else(|| {
                    DciError::InputSchema(format!(
                        "label '{}' not among training labels {:?}",
                        l, self.names
                    ))
                })
            })
            .collect()
    }

    pub fn index_of(&self, label: &str) -> Option<Label> {
        self.names.iter().position(|n| n == label).map(|i| i as Label)
    }

    pub fn name(&self, label: Label) -> &str {
        &self.names[usize::from(label.min(1))]
    }

    pub fn names(&self) -> &[String; 2] {
        &self.names
    }
}
