//! Term vocabulary and inverse-document-frequency table.

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{KentronError, Result};

/// A stable, ordered set of feature terms, fixed at training time.
///
/// Terms are kept in lexicographic order so the mapping from term to vector
/// dimension is identical across runs. Every weight vector used for training
/// or inference is dense over exactly this index space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a sorted, deduplicated term list.
    fn from_sorted_terms(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Vocabulary { terms, index }
    }

    /// Number of feature dimensions.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Dimension index of `term`, if it is part of the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at dimension `index`.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|t| t.as_str())
    }

    /// All terms, in dimension order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Inverse document frequencies over all observed terms.
///
/// The table covers every term seen in the training corpus, including terms
/// that pruning later removed from the feature vocabulary. Read-only after
/// training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdfTable {
    values: HashMap<String, f64>,
    document_count: usize,
}

impl IdfTable {
    /// IDF of `term`; 0.0 for terms never seen during training.
    pub fn idf(&self, term: &str) -> f64 {
        self.values.get(term).copied().unwrap_or(0.0)
    }

    /// Number of training documents the table was built from.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of terms covered by the table.
    pub fn term_count(&self) -> usize {
        self.values.len()
    }
}

/// Builds the feature vocabulary and IDF table from a training corpus.
#[derive(Debug, Clone, Default)]
pub struct VocabularyBuilder {
    pruning_threshold: f64,
}

impl VocabularyBuilder {
    /// Create a builder with pruning disabled.
    pub fn new() -> Self {
        VocabularyBuilder::default()
    }

    /// Drop terms whose IDF is below `threshold` from the vocabulary.
    /// The IDF table itself keeps every term.
    pub fn with_pruning_threshold(mut self, threshold: f64) -> Self {
        self.pruning_threshold = threshold;
        self
    }

    /// Build the vocabulary and IDF table.
    ///
    /// `df(t)` is the number of documents whose term counts contain `t` at
    /// least once, and `IDF(t) = ln(N / df(t))`. Terms occurring in every
    /// document get an IDF of exactly 0.0; they stay in the vocabulary
    /// unless pruned.
    ///
    /// Fails with [`KentronError::EmptyCorpus`] when `documents` is empty.
    pub fn build(&self, documents: &[Document]) -> Result<(Vocabulary, IdfTable)> {
        if documents.is_empty() {
            return Err(KentronError::empty_corpus(
                "cannot build a vocabulary from an empty training set",
            ));
        }

        let total_docs = documents.len();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            for (term, count) in &doc.term_count {
                if *count >= 1 {
                    *document_frequency.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let values: HashMap<String, f64> = document_frequency
            .iter()
            .map(|(term, df)| (term.clone(), (total_docs as f64 / *df as f64).ln()))
            .collect();

        let mut retained: Vec<String> = values
            .iter()
            .filter(|(_, idf)| **idf >= self.pruning_threshold)
            .map(|(term, _)| term.clone())
            .collect();
        retained.sort();

        let pruned = values.len() - retained.len();
        info!(
            "vocabulary: {} documents, {} terms ({} pruned)",
            total_docs,
            retained.len(),
            pruned
        );

        Ok((
            Vocabulary::from_sorted_terms(retained),
            IdfTable {
                values,
                document_count: total_docs,
            },
        ))
    }
}
