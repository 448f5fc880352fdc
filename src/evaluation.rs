//! Dataset splitting and accuracy evaluation.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

use crate::classification::RocchioClassifier;
use crate::document::Document;
use crate::error::{KentronError, Result};

/// How test documents are selected within each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SplitMode {
    /// Always the last K documents in load order. Deterministic.
    #[default]
    TakeLast,
    /// K documents chosen by uniform sampling without replacement. A fixed
    /// seed makes the selection reproducible.
    Random { seed: Option<u64> },
}

/// Configuration of the train/test split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of each category moved to the test set, in `[0, 1)`.
    pub testset_ratio: f64,
    /// Selection mode within a category.
    pub mode: SplitMode,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            testset_ratio: 0.1,
            mode: SplitMode::TakeLast,
        }
    }
}

/// A labeled corpus partitioned into training and test documents.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    /// Training documents, in load order.
    pub training: Vec<Document>,
    /// Test documents, in load order.
    pub test: Vec<Document>,
}

/// Accuracy tally over a classified test set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EvaluationReport {
    /// Documents whose predicted class matched their label exactly.
    pub correct: usize,
    /// Documents misclassified, unclassified, or failing classification.
    pub incorrect: usize,
}

impl EvaluationReport {
    /// Total number of evaluated documents.
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Fraction of correctly classified documents; 0.0 for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.correct as f64 / self.total() as f64
        }
    }
}

/// Group documents by category, categories in first-seen order.
///
/// Fails with [`KentronError::MissingLabel`] on an unlabeled document, since
/// an unlabeled document cannot be stratified.
pub fn partition_by_category(documents: Vec<Document>) -> Result<Vec<(String, Vec<Document>)>> {
    let mut classes: Vec<(String, Vec<Document>)> = Vec::new();

    for doc in documents {
        let category = doc
            .category
            .clone()
            .ok_or_else(|| KentronError::missing_label(&doc.name))?;

        match classes.iter_mut().find(|(c, _)| *c == category) {
            Some((_, docs)) => docs.push(doc),
            None => classes.push((category, vec![doc])),
        }
    }

    Ok(classes)
}

/// Split a labeled corpus into training and test sets, stratified per
/// category.
///
/// Each category contributes `floor(count * testset_ratio)` documents to the
/// test set; the remainder stays in training. Document order within each set
/// follows load order.
pub fn split_dataset(documents: Vec<Document>, config: &SplitConfig) -> Result<DatasetSplit> {
    if !(0.0..1.0).contains(&config.testset_ratio) {
        return Err(KentronError::invalid_config(format!(
            "testset_ratio must be in [0, 1), got {}",
            config.testset_ratio
        )));
    }

    let mut training = Vec::new();
    let mut test = Vec::new();

    for (category, docs) in partition_by_category(documents)? {
        let test_count = (docs.len() as f64 * config.testset_ratio).floor() as usize;
        let selected = select_test_documents(docs.len(), test_count, config.mode);
        debug!(
            "split: category '{}', {} train / {} test",
            category,
            docs.len() - test_count,
            test_count
        );

        for (index, doc) in docs.into_iter().enumerate() {
            if selected[index] {
                test.push(doc);
            } else {
                training.push(doc);
            }
        }
    }

    info!(
        "split dataset: {} training, {} test documents",
        training.len(),
        test.len()
    );
    Ok(DatasetSplit { training, test })
}

/// Mark which of `len` documents go to the test set.
fn select_test_documents(len: usize, test_count: usize, mode: SplitMode) -> Vec<bool> {
    let mut selected = vec![false; len];

    match mode {
        SplitMode::TakeLast => {
            for flag in selected.iter_mut().skip(len - test_count) {
                *flag = true;
            }
        }
        SplitMode::Random { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            for index in sample(&mut rng, len, test_count) {
                selected[index] = true;
            }
        }
    }

    selected
}

/// Classify every test document and tally exact label matches.
///
/// A classification failure counts the document as incorrect but does not
/// abort the evaluation.
pub fn evaluate(
    classifier: &RocchioClassifier,
    documents: &[Document],
) -> Result<EvaluationReport> {
    let mut report = EvaluationReport::default();

    for (doc, result) in documents
        .iter()
        .zip(classifier.classify_batch(documents))
    {
        let expected = doc
            .category
            .as_deref()
            .ok_or_else(|| KentronError::missing_label(&doc.name))?;

        match result {
            Ok(result) => {
                debug!(
                    "document '{}': expected='{}', best_class={:?}, score={:.4}",
                    doc.name, expected, result.best_class, result.best_score
                );
                if result.best_class.as_deref() == Some(expected) {
                    report.correct += 1;
                } else {
                    report.incorrect += 1;
                }
            }
            Err(e) => {
                warn!("document '{}' failed classification: {e}", doc.name);
                report.incorrect += 1;
            }
        }
    }

    info!(
        "evaluation: {} correct, {} incorrect ({:.1}% accuracy)",
        report.correct,
        report.incorrect,
        report.accuracy() * 100.0
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::TrainConfig;
    use std::collections::HashMap;

    fn doc(name: &str, category: &str, terms: &[(&str, u64)]) -> Document {
        let mut d = Document::with_category(name, "", category);
        d.set_term_count(
            terms
                .iter()
                .map(|(t, c)| (t.to_string(), *c))
                .collect::<HashMap<_, _>>(),
        );
        d
    }

    fn labeled_corpus() -> Vec<Document> {
        vec![
            doc("a1", "A", &[("cat", 1)]),
            doc("a2", "A", &[("cat", 2)]),
            doc("a3", "A", &[("cat", 1), ("dog", 1)]),
            doc("a4", "A", &[("dog", 2)]),
            doc("b1", "B", &[("car", 1)]),
            doc("b2", "B", &[("car", 2)]),
        ]
    }

    #[test]
    fn test_stratified_half_split_is_exact() {
        for mode in [SplitMode::TakeLast, SplitMode::Random { seed: Some(7) }] {
            let split = split_dataset(
                labeled_corpus(),
                &SplitConfig {
                    testset_ratio: 0.5,
                    mode,
                },
            )
            .unwrap();

            let test_a = split
                .test
                .iter()
                .filter(|d| d.category.as_deref() == Some("A"))
                .count();
            let test_b = split
                .test
                .iter()
                .filter(|d| d.category.as_deref() == Some("B"))
                .count();
            assert_eq!(test_a, 2, "class A must contribute exactly 2 test docs");
            assert_eq!(test_b, 1, "class B must contribute exactly 1 test doc");
            assert_eq!(split.training.len(), 3);
        }
    }

    #[test]
    fn test_take_last_selects_the_last_documents() {
        let split = split_dataset(
            labeled_corpus(),
            &SplitConfig {
                testset_ratio: 0.5,
                mode: SplitMode::TakeLast,
            },
        )
        .unwrap();

        let test_names: Vec<&str> = split.test.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(test_names, vec!["a3", "a4", "b2"]);
    }

    #[test]
    fn test_seeded_random_split_is_reproducible() {
        let config = SplitConfig {
            testset_ratio: 0.5,
            mode: SplitMode::Random { seed: Some(42) },
        };
        let first = split_dataset(labeled_corpus(), &config).unwrap();
        let second = split_dataset(labeled_corpus(), &config).unwrap();

        let names = |docs: &[Document]| docs.iter().map(|d| d.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&first.test), names(&second.test));
        assert_eq!(names(&first.training), names(&second.training));
    }

    #[test]
    fn test_ratio_out_of_range_is_rejected() {
        for ratio in [1.0, 1.5, -0.1] {
            let result = split_dataset(
                labeled_corpus(),
                &SplitConfig {
                    testset_ratio: ratio,
                    mode: SplitMode::TakeLast,
                },
            );
            assert!(matches!(result, Err(KentronError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_zero_ratio_keeps_everything_in_training() {
        let split = split_dataset(
            labeled_corpus(),
            &SplitConfig {
                testset_ratio: 0.0,
                mode: SplitMode::TakeLast,
            },
        )
        .unwrap();
        assert_eq!(split.training.len(), 6);
        assert!(split.test.is_empty());
    }

    #[test]
    fn test_unlabeled_document_fails_partition() {
        let mut documents = labeled_corpus();
        documents.push(Document::new("stray", ""));
        let result = partition_by_category(documents);
        assert!(matches!(result, Err(KentronError::MissingLabel(_))));
    }

    #[test]
    fn test_evaluate_tallies_matches() {
        let training = vec![
            doc("a1", "A", &[("cat", 2)]),
            doc("a2", "A", &[("cat", 1), ("dog", 1)]),
            doc("b1", "B", &[("car", 2)]),
            doc("b2", "B", &[("car", 1), ("bus", 1)]),
        ];
        let classifier = RocchioClassifier::train(&training, &TrainConfig::default()).unwrap();

        let test = vec![
            doc("t1", "A", &[("cat", 1), ("dog", 1)]),
            doc("t2", "B", &[("car", 1), ("bus", 1)]),
            doc("t3", "B", &[("submarine", 1)]),
        ];
        let report = evaluate(&classifier, &test).unwrap();

        assert_eq!(report.correct, 2);
        assert_eq!(report.incorrect, 1);
        assert_eq!(report.total(), 3);
        assert!((report.accuracy() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_report_accuracy_is_zero() {
        let report = EvaluationReport::default();
        assert_eq!(report.accuracy(), 0.0);
    }
}
