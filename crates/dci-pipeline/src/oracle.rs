// crates/dci-pipeline/src/oracle.rs
//
// Translation dictionary backing the `TermOracle` trait.

use std::collections::HashMap;
use std::path::Path;

use dci_core::{DciError, TermOracle};

use crate::corpus::{csv_error, open_csv};

/// Source term → target translations, loaded from a two-column CSV.
#[derive(Debug, Clone, Default)]
pub struct DictionaryOracle {
    entries: HashMap<String, Vec<String>>,
}

impl DictionaryOracle {
    /// Build from (source, target) pairs. Repeated source terms accumulate
    /// their translations in order; exact duplicates are ignored.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (source, target) in pairs {
            let translations = entries.entry(source.into()).or_default();
            let target = target.into();
            if !translations.contains(&target) {
                translations.push(target);
            }
        }
        Self { entries }
    }

    /// Load from a CSV with a header row: source term in the first column,
    /// target term in the second. Rows missing either cell are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DciError> {
        let path = path.as_ref();
        let mut reader = open_csv(path)?;
        let mut pairs = Vec::new();
        let mut skipped = 0usize;
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(path, e))?;
            match (record.get(0).map(str::trim), record.get(1).map(str::trim)) {
                (Some(s), Some(t)) if !s.is_empty() && !t.is_empty() => {
                    pairs.push((s.to_string(), t.to_string()))
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::debug!("{}: skipped {} incomplete dictionary rows", path.display(), skipped);
        }
        let oracle = Self::from_pairs(pairs);
        tracing::info!(
            "Loaded dictionary with {} source terms from {}",
            oracle.len(),
            path.display()
        );
        Ok(oracle)
    }

    /// Number of distinct source terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TermOracle for DictionaryOracle {
    fn translations(&self, term: &str) -> &[String] {
        self.entries.get(term).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use uuid::Uuid;

    #[test]
    fn lookups_and_unknown_terms() {
        let oracle = DictionaryOracle::from_pairs([("good", "gut"), ("bad", "schlecht")]);
        assert_eq!(oracle.translations("good"), &["gut".to_string()]);
        assert!(oracle.translations("plot").is_empty());
        assert_eq!(oracle.len(), 2);
    }

    #[test]
    fn repeated_source_terms_accumulate() {
        let oracle =
            DictionaryOracle::from_pairs([("great", "toll"), ("great", "super"), ("great", "toll")]);
        assert_eq!(
            oracle.translations("great"),
            &["toll".to_string(), "super".to_string()]
        );
    }

    #[test]
    fn loads_csv_skipping_incomplete_rows() {
        let path = std::env::temp_dir().join(format!("dci_dict_{}.csv", Uuid::now_v7()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"en,de\ngood,gut\nbad,\nboring,langweilig\n").unwrap();
        let oracle = DictionaryOracle::load(&path).unwrap();
        assert_eq!(oracle.len(), 2);
        assert_eq!(oracle.translations("boring"), &["langweilig".to_string()]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_dictionary_is_missing_resource() {
        let err = DictionaryOracle::load("/nonexistent/dict.csv").unwrap_err();
        assert!(matches!(err, DciError::MissingResource(_)));
    }
}
