//! Document feature vectors.
//!
//! The vectorizer is the single place feature vectors are materialized; both
//! centroid training and inference go through it, so the two always agree on
//! the feature space.

use serde::{Deserialize, Serialize};

use crate::classification::vocabulary::{IdfTable, Vocabulary};
use crate::document::Document;

/// Weighting scheme applied to term frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeightingScheme {
    /// Raw term frequencies: `weight(t) = count(t) / total_terms`.
    TermFrequency,
    /// IDF-weighted frequencies: `weight(t) = frequency(t) * IDF(t)`.
    #[default]
    TfIdf,
}

/// Dense feature vectors of one document over the vocabulary dimensions.
///
/// Recomputed from the document's term counts on demand; absent terms hold
/// an explicit zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFeatures {
    /// Term occurrence counts per vocabulary dimension.
    pub counts: Vec<u64>,
    /// Term frequencies: counts normalized by the document's total term
    /// occurrences. All zero for a zero-term document.
    pub frequencies: Vec<f64>,
    /// Final term weights under the configured weighting scheme.
    pub weights: Vec<f64>,
}

/// Computes [`DocumentFeatures`] against a fixed vocabulary and IDF table.
#[derive(Debug, Clone, Copy)]
pub struct DocumentVectorizer<'a> {
    vocabulary: &'a Vocabulary,
    idf: Option<&'a IdfTable>,
}

impl<'a> DocumentVectorizer<'a> {
    /// Create a vectorizer.
    ///
    /// With `idf` supplied, weights are `frequency * IDF`; without it, the
    /// weights are the plain term frequencies.
    pub fn new(vocabulary: &'a Vocabulary, idf: Option<&'a IdfTable>) -> Self {
        DocumentVectorizer { vocabulary, idf }
    }

    /// Create a vectorizer for the given weighting scheme.
    pub fn for_scheme(
        vocabulary: &'a Vocabulary,
        idf: &'a IdfTable,
        scheme: WeightingScheme,
    ) -> Self {
        match scheme {
            WeightingScheme::TermFrequency => DocumentVectorizer::new(vocabulary, None),
            WeightingScheme::TfIdf => DocumentVectorizer::new(vocabulary, Some(idf)),
        }
    }

    /// Compute the document's feature vectors.
    ///
    /// Pure and idempotent: the same document and vocabulary always produce
    /// bit-identical vectors. A document with zero terms yields all-zero
    /// frequency and weight vectors.
    pub fn vectorize(&self, document: &Document) -> DocumentFeatures {
        let dims = self.vocabulary.len();
        let mut counts = vec![0u64; dims];

        for (term, count) in &document.term_count {
            if let Some(index) = self.vocabulary.index_of(term) {
                counts[index] += *count;
            }
        }

        // Total over the whole document, not just vocabulary terms, so
        // frequencies stay comparable across differently pruned runs.
        let total_terms = document.total_terms();
        let frequencies: Vec<f64> = if total_terms == 0 {
            vec![0.0; dims]
        } else {
            counts
                .iter()
                .map(|count| *count as f64 / total_terms as f64)
                .collect()
        };

        let weights: Vec<f64> = match self.idf {
            Some(idf) => frequencies
                .iter()
                .enumerate()
                .map(|(index, frequency)| {
                    let term = self.vocabulary.term(index).unwrap_or_default();
                    frequency * idf.idf(term)
                })
                .collect(),
            None => frequencies.clone(),
        };

        DocumentFeatures {
            counts,
            frequencies,
            weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::vocabulary::VocabularyBuilder;
    use std::collections::HashMap;

    fn doc(name: &str, terms: &[(&str, u64)]) -> Document {
        let mut d = Document::new(name, "");
        d.set_term_count(
            terms
                .iter()
                .map(|(t, c)| (t.to_string(), *c))
                .collect::<HashMap<_, _>>(),
        );
        d
    }

    fn fixture() -> (Vocabulary, IdfTable, Vec<Document>) {
        let documents = vec![
            doc("d1", &[("cat", 2), ("dog", 1)]),
            doc("d2", &[("cat", 1), ("bird", 1)]),
        ];
        let (vocabulary, idf) = VocabularyBuilder::new().build(&documents).unwrap();
        (vocabulary, idf, documents)
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        let (vocabulary, idf, documents) = fixture();
        let vectorizer = DocumentVectorizer::new(&vocabulary, Some(&idf));

        for document in &documents {
            let features = vectorizer.vectorize(document);
            let sum: f64 = features.frequencies.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "frequencies must sum to 1");
        }
    }

    #[test]
    fn test_zero_term_document_yields_zero_vectors() {
        let (vocabulary, idf, _) = fixture();
        let vectorizer = DocumentVectorizer::new(&vocabulary, Some(&idf));

        let features = vectorizer.vectorize(&doc("empty", &[]));
        assert!(features.counts.iter().all(|c| *c == 0));
        assert!(features.frequencies.iter().all(|f| *f == 0.0));
        assert!(features.weights.iter().all(|w| *w == 0.0));
    }

    #[test]
    fn test_out_of_vocabulary_terms_are_ignored_in_counts() {
        let (vocabulary, idf, _) = fixture();
        let vectorizer = DocumentVectorizer::new(&vocabulary, Some(&idf));

        // "fish" is not in the vocabulary but still counts toward the total,
        // so in-vocabulary frequencies shrink accordingly.
        let features = vectorizer.vectorize(&doc("d3", &[("cat", 1), ("fish", 1)]));
        let cat = vocabulary.index_of("cat").unwrap();
        assert_eq!(features.counts[cat], 1);
        assert_eq!(features.frequencies[cat], 0.5);
    }

    #[test]
    fn test_tf_mode_equals_frequencies() {
        let (vocabulary, idf, documents) = fixture();
        let vectorizer =
            DocumentVectorizer::for_scheme(&vocabulary, &idf, WeightingScheme::TermFrequency);

        let features = vectorizer.vectorize(&documents[0]);
        assert_eq!(features.weights, features.frequencies);
    }

    #[test]
    fn test_tfidf_mode_applies_idf() {
        let (vocabulary, idf, documents) = fixture();
        let vectorizer = DocumentVectorizer::for_scheme(&vocabulary, &idf, WeightingScheme::TfIdf);

        let features = vectorizer.vectorize(&documents[0]);
        let dog = vocabulary.index_of("dog").unwrap();
        let expected = (1.0 / 3.0) * 2.0_f64.ln();
        assert!((features.weights[dog] - expected).abs() < 1e-12);

        // "cat" occurs in every document, so its weight collapses to zero.
        let cat = vocabulary.index_of("cat").unwrap();
        assert_eq!(features.weights[cat], 0.0);
    }

    #[test]
    fn test_vectorize_is_idempotent() {
        let (vocabulary, idf, documents) = fixture();
        let vectorizer = DocumentVectorizer::new(&vocabulary, Some(&idf));

        let first = vectorizer.vectorize(&documents[0]);
        let second = vectorizer.vectorize(&documents[0]);
        assert_eq!(first, second);
    }
}
