// crates/dci-transform/src/align.rs
//
// Vocabulary alignment: which source column and which target column denote
// the same concept. Within one language this is string identity; across
// languages a term oracle supplies the translations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use dci_core::{TermOracle, Vocabulary};

/// A (source column, target column) pair denoting one concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AlignedPair {
    pub source_col: usize,
    pub target_col: usize,
}

/// Aligned pairs plus bookkeeping about dropped source terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Pairs ordered by source column, then target column. No duplicates.
    pub pairs: Vec<AlignedPair>,
    /// Source terms with no counterpart in the target vocabulary.
    pub unaligned_terms: usize,
}

/// Align two vocabularies, optionally through a translation oracle.
pub fn align_vocabularies(
    source: &Vocabulary,
    target: &Vocabulary,
    oracle: Option<&dyn TermOracle>,
) -> Alignment {
    let mut pairs = BTreeSet::new();
    let mut unaligned_terms = 0;

    for (source_col, term) in source.terms().iter().enumerate() {
        let before = pairs.len();
        match oracle {
            None => {
                if let Some(target_col) = target.index_of(term) {
                    pairs.insert(AlignedPair {
                        source_col,
                        target_col,
                    });
                }
            }
            Some(oracle) => {
                for translation in oracle.translations(term) {
                    if let Some(target_col) = target.index_of(translation) {
                        pairs.insert(AlignedPair {
                            source_col,
                            target_col,
                        });
                    }
                }
            }
        }
        if pairs.len() == before {
            unaligned_terms += 1;
        }
    }

    let alignment = Alignment {
        pairs: pairs.into_iter().collect(),
        unaligned_terms,
    };
    tracing::debug!(
        "Aligned {} pairs; {} of {} source terms have no target counterpart",
        alignment.pairs.len(),
        alignment.unaligned_terms,
        source.len()
    );
    alignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapOracle(HashMap<String, Vec<String>>);

    impl TermOracle for MapOracle {
        fn translations(&self, term: &str) -> &[String] {
            self.0.get(term).map(Vec::as_slice).unwrap_or(&[])
        }
    }

    fn vocab(terms: &[&str]) -> Vocabulary {
        Vocabulary::from_terms(terms.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn identity_alignment_pairs_shared_terms() {
        let s = vocab(&["bad", "book", "good"]);
        let t = vocab(&["dvd", "good", "bad"]);
        let a = align_vocabularies(&s, &t, None);
        assert_eq!(
            a.pairs,
            vec![
                AlignedPair { source_col: 0, target_col: 2 },
                AlignedPair { source_col: 2, target_col: 1 },
            ]
        );
        assert_eq!(a.unaligned_terms, 1);
        for p in &a.pairs {
            assert_eq!(s.term(p.source_col), t.term(p.target_col));
        }
    }

    #[test]
    fn oracle_alignment_follows_translations() {
        let s = vocab(&["good", "bad", "book"]);
        let t = vocab(&["gut", "schlecht", "prima"]);
        let mut map = HashMap::new();
        map.insert("good".to_string(), vec!["gut".to_string(), "prima".to_string()]);
        map.insert("bad".to_string(), vec!["schlecht".to_string(), "schlecht".to_string()]);
        map.insert("book".to_string(), vec!["buch".to_string()]);
        let oracle = MapOracle(map);

        let a = align_vocabularies(&s, &t, Some(&oracle));
        assert_eq!(
            a.pairs,
            vec![
                AlignedPair { source_col: 0, target_col: 0 },
                AlignedPair { source_col: 0, target_col: 2 },
                AlignedPair { source_col: 1, target_col: 1 },
            ]
        );
        // "book" -> "buch" is absent from the target vocabulary.
        assert_eq!(a.unaligned_terms, 1);
    }

    #[test]
    fn oracle_ignores_string_identity() {
        let s = vocab(&["good"]);
        let t = vocab(&["good"]);
        let oracle = MapOracle(HashMap::new());
        let a = align_vocabularies(&s, &t, Some(&oracle));
        assert!(a.pairs.is_empty());
        assert_eq!(a.unaligned_terms, 1);
    }
}
