// crates/dci-vectorize/src/tokenize.rs
//
// Word tokenizer: maximal runs of Unicode alphanumerics or underscores,
// lowercased. Single-character words are kept.

/// Whether a character belongs to a word token.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a document into lowercased word tokens, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Great book, would read again!"),
            vec!["great", "book", "would", "read", "again"]
        );
    }

    #[test]
    fn keeps_single_chars_digits_and_underscores() {
        assert_eq!(tokenize("a 5-star snake_case"), vec!["a", "5", "star", "snake_case"]);
    }

    #[test]
    fn handles_unicode_words() {
        assert_eq!(tokenize("Très BIEN; schön"), vec!["très", "bien", "schön"]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ... ").is_empty());
    }
}
