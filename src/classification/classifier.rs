//! The trained Rocchio classifier and cosine scoring.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classification::TrainConfig;
use crate::classification::rocchio::{self, ClassCentroid};
use crate::classification::vectorizer::{DocumentFeatures, DocumentVectorizer, WeightingScheme};
use crate::classification::vocabulary::{IdfTable, Vocabulary, VocabularyBuilder};
use crate::document::Document;
use crate::error::{KentronError, Result};

/// Outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning category, or `None` when no centroid scored above zero.
    pub best_class: Option<String>,
    /// Cosine score of the winning centroid; 0.0 when no centroid won.
    pub best_score: f64,
}

/// Summary of a completed training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Number of training documents.
    pub documents: usize,
    /// Number of distinct categories.
    pub categories: usize,
    /// Number of feature dimensions after pruning.
    pub vocabulary_size: usize,
    /// Number of terms dropped by pruning.
    pub pruned_terms: usize,
    /// Wall time of the training run.
    pub training_time_ms: u64,
    /// When training finished.
    pub trained_at: chrono::DateTime<chrono::Utc>,
}

/// A trained vector-space classifier: vocabulary, IDF table and one Rocchio
/// centroid per category.
///
/// Immutable after training. Several independently trained classifiers can
/// coexist; there is no process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocchioClassifier {
    vocabulary: Vocabulary,
    idf: IdfTable,
    weighting: WeightingScheme,
    centroids: Vec<ClassCentroid>,
    stats: TrainingStats,
}

impl RocchioClassifier {
    /// Train a classifier on labeled documents.
    ///
    /// Builds the vocabulary and IDF table, vectorizes every document and
    /// derives the class centroids. Fails with [`KentronError::EmptyCorpus`]
    /// when `documents` is empty and [`KentronError::MissingLabel`] when a
    /// document has no category.
    pub fn train(documents: &[Document], config: &TrainConfig) -> Result<Self> {
        let start = Instant::now();

        let (vocabulary, idf) = VocabularyBuilder::new()
            .with_pruning_threshold(config.pruning_threshold)
            .build(documents)?;
        info!(
            "training: {} documents, {} feature terms",
            documents.len(),
            vocabulary.len()
        );

        let vectorizer = DocumentVectorizer::for_scheme(&vocabulary, &idf, config.weighting);
        let features: Vec<DocumentFeatures> = documents
            .par_iter()
            .map(|doc| vectorizer.vectorize(doc))
            .collect();

        let centroids =
            rocchio::compute_centroids(documents, &features, &config.rocchio, vocabulary.len())?;

        let stats = TrainingStats {
            documents: documents.len(),
            categories: centroids.len(),
            vocabulary_size: vocabulary.len(),
            pruned_terms: idf.term_count() - vocabulary.len(),
            training_time_ms: start.elapsed().as_millis() as u64,
            trained_at: chrono::Utc::now(),
        };
        info!(
            "training complete: {} classes in {}ms",
            stats.categories, stats.training_time_ms
        );

        Ok(RocchioClassifier {
            vocabulary,
            idf,
            weighting: config.weighting,
            centroids,
            stats,
        })
    }

    /// Compute a document's feature vectors against this model.
    ///
    /// The same routine the trainer used to build the centroids, so training
    /// and inference vectors always share dimensions.
    pub fn compute_document_features(&self, document: &Document) -> DocumentFeatures {
        DocumentVectorizer::for_scheme(&self.vocabulary, &self.idf, self.weighting)
            .vectorize(document)
    }

    /// Classify a document by cosine similarity against every centroid.
    ///
    /// A centroid wins only with a strictly positive score; a document with
    /// no positive overlap against any centroid yields `best_class: None`.
    /// Ties resolve to the earlier centroid in training insertion order.
    pub fn classify(&self, document: &Document) -> Result<ClassificationResult> {
        let features = self.compute_document_features(document);
        let result = self.classify_features(&features)?;
        debug!(
            "document '{}': best_class={:?}, score={:.4}",
            document.name, result.best_class, result.best_score
        );
        Ok(result)
    }

    /// Classify an externally computed weight vector.
    ///
    /// Fails with [`KentronError::DimensionMismatch`] if the vector is not
    /// keyed over this model's vocabulary.
    pub fn classify_features(&self, features: &DocumentFeatures) -> Result<ClassificationResult> {
        let mut best_score = 0.0;
        let mut best_class: Option<String> = None;

        for centroid in &self.centroids {
            let score = cosine_similarity(&features.weights, &centroid.weights)?;
            if score > best_score {
                best_score = score;
                best_class = Some(centroid.category.clone());
            }
        }

        Ok(ClassificationResult {
            best_class,
            best_score,
        })
    }

    /// Classify a batch of documents in parallel.
    ///
    /// Results come back in input order. A failure is local to its document
    /// and does not affect the rest of the batch.
    pub fn classify_batch(&self, documents: &[Document]) -> Vec<Result<ClassificationResult>> {
        documents
            .par_iter()
            .map(|doc| self.classify(doc))
            .collect()
    }

    /// The feature vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The IDF table built at training time.
    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    /// The trained centroids, in category-first-seen order.
    pub fn centroids(&self) -> &[ClassCentroid] {
        &self.centroids
    }

    /// The weighting scheme the model was trained with.
    pub fn weighting(&self) -> WeightingScheme {
        self.weighting
    }

    /// Training statistics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }
}

/// Cosine similarity between two vectors over the same dimensions.
///
/// Fails with [`KentronError::DimensionMismatch`] when the lengths differ;
/// a zero-norm vector on either side scores 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(KentronError::dimension_mismatch(a.len(), b.len()));
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}
