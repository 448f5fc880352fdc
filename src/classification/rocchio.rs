//! Rocchio centroid training.

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classification::vectorizer::DocumentFeatures;
use crate::document::Document;
use crate::error::{KentronError, Result};

/// Variant of the Rocchio centroid arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RocchioVariant {
    /// Independent positive and negative accumulators:
    /// `centroid = beta * pos_mean - gamma * neg_mean`.
    #[default]
    Standard,
    /// Folds the negative mean into the already beta-scaled positive
    /// accumulator and leaves the gamma term at zero:
    /// `centroid = beta * pos_mean + neg_mean`. Kept for compatibility with
    /// earlier revisions of this pipeline.
    Folded,
}

/// Parameters of the Rocchio centroid rule.
///
/// `beta` scales the positive (same-class) mean, `gamma` the negative
/// (rest-of-corpus) mean. Both are fixed inputs of the trainer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RocchioConfig {
    /// Positive reinforcement factor.
    pub beta: f64,
    /// Negative reinforcement factor.
    pub gamma: f64,
    /// Accumulator variant.
    pub variant: RocchioVariant,
}

impl Default for RocchioConfig {
    fn default() -> Self {
        RocchioConfig {
            beta: 16.0,
            gamma: 4.0,
            variant: RocchioVariant::Standard,
        }
    }
}

/// The trained representative vector of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCentroid {
    /// Category label.
    pub category: String,
    /// Centroid weights over the vocabulary dimensions.
    pub weights: Vec<f64>,
}

/// Compute one centroid per category observed in the training set.
///
/// `features[i]` must be the feature vectors of `documents[i]`. Centroids
/// come back in category-first-seen order, which is what makes classification
/// tie-breaking deterministic. A category owning the whole corpus degenerates
/// to a pure positive centroid (the empty negative set contributes a zero
/// mean); the same holds for an empty positive set.
///
/// Fails with [`KentronError::MissingLabel`] if any document is unlabeled.
pub fn compute_centroids(
    documents: &[Document],
    features: &[DocumentFeatures],
    config: &RocchioConfig,
    dimensions: usize,
) -> Result<Vec<ClassCentroid>> {
    debug_assert_eq!(documents.len(), features.len());

    let mut categories: Vec<String> = Vec::new();
    for doc in documents {
        let category = doc
            .category
            .as_ref()
            .ok_or_else(|| KentronError::missing_label(&doc.name))?;
        if !categories.iter().any(|c| c == category) {
            categories.push(category.clone());
        }
    }

    let centroids: Vec<ClassCentroid> = categories
        .par_iter()
        .map(|category| {
            let (positives, negatives): (Vec<usize>, Vec<usize>) = (0..documents.len())
                .partition(|i| documents[*i].category.as_deref() == Some(category));

            let weights = centroid_weights(&positives, &negatives, features, config, dimensions);
            debug!(
                "class '{}': {} positives, {} negatives",
                category,
                positives.len(),
                negatives.len()
            );

            ClassCentroid {
                category: category.clone(),
                weights,
            }
        })
        .collect();

    info!("trained {} class centroids", centroids.len());
    Ok(centroids)
}

fn centroid_weights(
    positives: &[usize],
    negatives: &[usize],
    features: &[DocumentFeatures],
    config: &RocchioConfig,
    dimensions: usize,
) -> Vec<f64> {
    let mut weights = Vec::with_capacity(dimensions);

    for dim in 0..dimensions {
        let pos_mean = mean_at(positives, features, dim);
        let neg_mean = mean_at(negatives, features, dim);

        let value = match config.variant {
            RocchioVariant::Standard => config.beta * pos_mean - config.gamma * neg_mean,
            RocchioVariant::Folded => config.beta * pos_mean + neg_mean,
        };
        weights.push(value);
    }

    weights
}

/// Mean weight of dimension `dim` over the given documents; 0.0 for an
/// empty set.
fn mean_at(indices: &[usize], features: &[DocumentFeatures], dim: usize) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let sum: f64 = indices.iter().map(|i| features[*i].weights[dim]).sum();
    sum / indices.len() as f64
}
