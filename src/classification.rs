//! Vector-space document classification.
//!
//! The training pipeline runs in stages: a term vocabulary with IDF weights
//! is built from the labeled corpus, every document is turned into a dense
//! weight vector over that vocabulary, and one Rocchio centroid is derived
//! per category. Unseen documents are then classified by cosine similarity
//! against the centroids.

pub mod classifier;
pub mod rocchio;
pub mod vectorizer;
pub mod vocabulary;

pub use classifier::{ClassificationResult, RocchioClassifier, TrainingStats};
pub use rocchio::{ClassCentroid, RocchioConfig, RocchioVariant};
pub use vectorizer::{DocumentFeatures, DocumentVectorizer, WeightingScheme};
pub use vocabulary::{IdfTable, Vocabulary, VocabularyBuilder};

use serde::{Deserialize, Serialize};

/// Configuration for a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Terms with an IDF below this threshold are dropped from the feature
    /// vocabulary. `0.0` disables pruning.
    pub pruning_threshold: f64,
    /// Weighting scheme applied to document feature vectors.
    pub weighting: WeightingScheme,
    /// Rocchio centroid parameters.
    pub rocchio: RocchioConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            pruning_threshold: 0.0,
            weighting: WeightingScheme::TfIdf,
            rocchio: RocchioConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_config_default() {
        let config = TrainConfig::default();
        assert_eq!(config.pruning_threshold, 0.0);
        assert_eq!(config.weighting, WeightingScheme::TfIdf);
        assert_eq!(config.rocchio.beta, 16.0);
        assert_eq!(config.rocchio.gamma, 4.0);
    }
}
