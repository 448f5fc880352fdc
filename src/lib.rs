//! # Kentron
//!
//! A Rocchio centroid text classification library for Rust.
//!
//! Labeled training documents, pre-tokenized into terms, are turned into a
//! term vocabulary with IDF weights and dense per-document weight vectors;
//! one centroid per category is derived with the Rocchio positive/negative
//! reinforcement rule, and unseen documents are classified by cosine
//! similarity against those centroids.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Pluggable term extraction with a bundled Unicode reference extractor
//! - Term-frequency and TF-IDF weighting, with optional vocabulary pruning
//! - Parallel term extraction, training and batch classification
//! - Stratified train/test splitting and accuracy evaluation

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod parallel_extraction;

pub mod prelude {
    //! Convenience re-exports of the most commonly used types.

    pub use crate::analysis::extractor::{TermExtractor, UnicodeTermExtractor};
    pub use crate::classification::{
        ClassificationResult, RocchioClassifier, RocchioConfig, RocchioVariant, TrainConfig,
        WeightingScheme,
    };
    pub use crate::document::Document;
    pub use crate::error::{KentronError, Result};
    pub use crate::evaluation::{
        EvaluationReport, SplitConfig, SplitMode, evaluate, split_dataset,
    };
    pub use crate::parallel_extraction::{ExtractionConfig, FailurePolicy, ParallelExtractor};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
