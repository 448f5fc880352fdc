//! Term extraction seam and a Unicode reference implementation.
//!
//! Tokenization, lemmatization and stop-word policy belong to an external
//! linguistic pipeline; [`TermExtractor`] is the boundary it plugs into. The
//! bundled [`UnicodeTermExtractor`] splits on Unicode word boundaries
//! (UAX #29), lowercases, and removes stop words, which is enough to run and
//! test the full pipeline without any external tooling.
//!
//! # Examples
//!
//! ```
//! use kentron::analysis::extractor::{TermExtractor, UnicodeTermExtractor};
//!
//! let extractor = UnicodeTermExtractor::new();
//! let terms = extractor.extract_terms("The cat saw the cat.").unwrap();
//!
//! // "the" is removed as a stop word, the rest is lowercased and counted
//! assert_eq!(terms.get("cat"), Some(&2));
//! assert_eq!(terms.get("saw"), Some(&1));
//! assert!(!terms.contains_key("the"));
//! ```

use std::collections::{HashMap, HashSet};

use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;

/// Default English stop words list.
///
/// Common English words that carry no class-discriminating information.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Boundary to the external linguistic pipeline: turns raw text into a
/// multiset of normalized terms.
///
/// Implementations must be usable from the parallel extraction pool, hence
/// the `Send + Sync` bound.
pub trait TermExtractor: Send + Sync {
    /// Extract the term multiset of `text`, as a term → occurrence count map.
    fn extract_terms(&self, text: &str) -> Result<HashMap<String, u64>>;
}

/// A reference [`TermExtractor`] based on Unicode word segmentation.
///
/// Splits on UAX #29 word boundaries (punctuation and whitespace are never
/// produced as terms), lowercases every token, drops tokens shorter than the
/// minimum length and removes stop words.
#[derive(Debug, Clone)]
pub struct UnicodeTermExtractor {
    lowercase: bool,
    min_term_length: usize,
    stop_words: HashSet<String>,
}

impl Default for UnicodeTermExtractor {
    fn default() -> Self {
        UnicodeTermExtractor::new()
    }
}

impl UnicodeTermExtractor {
    /// Create an extractor with the default English stop words.
    pub fn new() -> Self {
        UnicodeTermExtractor {
            lowercase: true,
            min_term_length: 1,
            stop_words: DEFAULT_ENGLISH_STOP_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }

    /// Create an extractor that keeps every token.
    pub fn without_stop_words() -> Self {
        UnicodeTermExtractor {
            lowercase: true,
            min_term_length: 1,
            stop_words: HashSet::new(),
        }
    }

    /// Replace the stop-word set.
    pub fn with_stop_words(mut self, stop_words: HashSet<String>) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Set the minimum term length; shorter tokens are dropped.
    pub fn with_min_term_length(mut self, min_term_length: usize) -> Self {
        self.min_term_length = min_term_length;
        self
    }

    /// Disable lowercasing.
    pub fn case_sensitive(mut self) -> Self {
        self.lowercase = false;
        self
    }
}

impl TermExtractor for UnicodeTermExtractor {
    fn extract_terms(&self, text: &str) -> Result<HashMap<String, u64>> {
        let mut terms: HashMap<String, u64> = HashMap::new();

        for word in text.unicode_words() {
            let term = if self.lowercase {
                word.to_lowercase()
            } else {
                word.to_string()
            };

            if term.chars().count() < self.min_term_length || self.stop_words.contains(&term) {
                continue;
            }

            *terms.entry(term).or_insert(0) += 1;
        }

        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_word_extraction() {
        let extractor = UnicodeTermExtractor::without_stop_words();
        let terms = extractor.extract_terms("Hello, world! Hello again.").unwrap();

        assert_eq!(terms.get("hello"), Some(&2));
        assert_eq!(terms.get("world"), Some(&1));
        assert_eq!(terms.get("again"), Some(&1));
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn test_stop_words_removed() {
        let extractor = UnicodeTermExtractor::new();
        let terms = extractor.extract_terms("the cat and the dog").unwrap();

        assert!(!terms.contains_key("the"));
        assert!(!terms.contains_key("and"));
        assert_eq!(terms.get("cat"), Some(&1));
        assert_eq!(terms.get("dog"), Some(&1));
    }

    #[test]
    fn test_min_term_length() {
        let extractor = UnicodeTermExtractor::without_stop_words().with_min_term_length(3);
        let terms = extractor.extract_terms("go to the gym").unwrap();

        assert!(!terms.contains_key("go"));
        assert!(!terms.contains_key("to"));
        assert_eq!(terms.get("the"), Some(&1));
        assert_eq!(terms.get("gym"), Some(&1));
    }

    #[test]
    fn test_case_sensitive_extraction() {
        let extractor = UnicodeTermExtractor::without_stop_words().case_sensitive();
        let terms = extractor.extract_terms("Rust rust RUST").unwrap();

        assert_eq!(terms.get("Rust"), Some(&1));
        assert_eq!(terms.get("rust"), Some(&1));
        assert_eq!(terms.get("RUST"), Some(&1));
    }

    #[test]
    fn test_empty_text_produces_no_terms() {
        let extractor = UnicodeTermExtractor::new();
        let terms = extractor.extract_terms("").unwrap();
        assert!(terms.is_empty());
    }
}
