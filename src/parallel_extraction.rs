//! Parallel term extraction over a corpus.
//!
//! Extraction of one document is independent of every other document, so the
//! corpus is fanned out over a fixed-size thread pool; each task writes only
//! its own document's term counts. The pool joins before returning, so the
//! caller always sees a fully extracted corpus.

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::extractor::TermExtractor;
use crate::document::Document;
use crate::error::{KentronError, Result};

/// What to do when extraction fails for a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failing document.
    #[default]
    FailFast,
    /// Log a warning and drop the failing document from the corpus.
    SkipDocument,
}

/// Configuration for the extraction pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Number of worker threads; 0 uses the available hardware parallelism.
    pub num_threads: usize,
    /// Per-document failure policy.
    pub failure_policy: FailurePolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            num_threads: 0,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

/// Runs a [`TermExtractor`] over whole corpora on a dedicated thread pool.
pub struct ParallelExtractor {
    pool: rayon::ThreadPool,
    failure_policy: FailurePolicy,
}

impl ParallelExtractor {
    /// Create an extractor pool.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let num_threads = if config.num_threads == 0 {
            num_cpus::get()
        } else {
            config.num_threads
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| KentronError::analysis(format!("failed to build thread pool: {e}")))?;

        Ok(ParallelExtractor {
            pool,
            failure_policy: config.failure_policy,
        })
    }

    /// Extract terms for every document, in parallel.
    ///
    /// Documents come back in input order with their term counts filled in.
    /// Under [`FailurePolicy::FailFast`] the first extraction failure aborts
    /// the call; under [`FailurePolicy::SkipDocument`] failing documents are
    /// dropped from the result.
    pub fn extract_corpus<E: TermExtractor>(
        &self,
        extractor: &E,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>> {
        let failure_policy = self.failure_policy;

        let extracted: Result<Vec<Option<Document>>> = self.pool.install(|| {
            documents
                .into_par_iter()
                .map(|mut doc| match extractor.extract_terms(&doc.text) {
                    Ok(term_count) => {
                        doc.set_term_count(term_count);
                        Ok(Some(doc))
                    }
                    Err(e) => match failure_policy {
                        FailurePolicy::FailFast => {
                            Err(KentronError::extraction(&doc.name, e.to_string()))
                        }
                        FailurePolicy::SkipDocument => {
                            warn!("skipping document '{}': {e}", doc.name);
                            Ok(None)
                        }
                    },
                })
                .collect()
        });

        Ok(extracted?.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extractor::UnicodeTermExtractor;
    use std::collections::HashMap;

    /// An extractor that fails on documents whose text contains "poison".
    struct PoisonExtractor;

    impl TermExtractor for PoisonExtractor {
        fn extract_terms(&self, text: &str) -> Result<HashMap<String, u64>> {
            if text.contains("poison") {
                return Err(KentronError::analysis("poisoned document"));
            }
            UnicodeTermExtractor::without_stop_words().extract_terms(text)
        }
    }

    fn corpus() -> Vec<Document> {
        vec![
            Document::new("d1", "cat dog cat"),
            Document::new("d2", "bird"),
            Document::new("d3", "bus car"),
        ]
    }

    #[test]
    fn test_extraction_fills_term_counts_in_order() {
        let pool = ParallelExtractor::new(&ExtractionConfig::default()).unwrap();
        let extractor = UnicodeTermExtractor::without_stop_words();

        let documents = pool.extract_corpus(&extractor, corpus()).unwrap();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].name, "d1");
        assert_eq!(documents[0].term_count.get("cat"), Some(&2));
        assert_eq!(documents[1].term_count.get("bird"), Some(&1));
        assert_eq!(documents[2].total_terms(), 2);
    }

    #[test]
    fn test_fail_fast_aborts_on_single_failure() {
        let pool = ParallelExtractor::new(&ExtractionConfig {
            num_threads: 2,
            failure_policy: FailurePolicy::FailFast,
        })
        .unwrap();

        let mut documents = corpus();
        documents.push(Document::new("bad", "poison text"));

        let result = pool.extract_corpus(&PoisonExtractor, documents);
        assert!(matches!(result, Err(KentronError::Extraction { .. })));
    }

    #[test]
    fn test_skip_policy_drops_failing_documents() {
        let pool = ParallelExtractor::new(&ExtractionConfig {
            num_threads: 2,
            failure_policy: FailurePolicy::SkipDocument,
        })
        .unwrap();

        let mut documents = corpus();
        documents.insert(1, Document::new("bad", "poison text"));

        let extracted = pool.extract_corpus(&PoisonExtractor, documents).unwrap();
        assert_eq!(extracted.len(), 3);
        assert!(extracted.iter().all(|d| d.name != "bad"));
    }
}
