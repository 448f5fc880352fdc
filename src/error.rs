//! Error types for the Kentron library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`KentronError`] enum.
//!
//! # Examples
//!
//! ```
//! use kentron::error::{KentronError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KentronError::empty_corpus("no training documents"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kentron operations.
#[derive(Error, Debug)]
pub enum KentronError {
    /// The training set contains no documents.
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// Two vectors built over different vocabularies were compared.
    #[error("Dimension mismatch: expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Term extraction failed for a single document.
    #[error("Term extraction failed for document '{document}': {message}")]
    Extraction { document: String, message: String },

    /// A training or evaluation document carries no category label.
    #[error("Document '{0}' has no category label")]
    MissingLabel(String),

    /// Text analysis errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors (corpus loading, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`KentronError`].
pub type Result<T> = std::result::Result<T, KentronError>;

impl KentronError {
    /// Create a new empty-corpus error.
    pub fn empty_corpus<S: Into<String>>(msg: S) -> Self {
        KentronError::EmptyCorpus(msg.into())
    }

    /// Create a new dimension-mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        KentronError::DimensionMismatch { expected, actual }
    }

    /// Create a new extraction error for the given document.
    pub fn extraction<S: Into<String>, M: Into<String>>(document: S, message: M) -> Self {
        KentronError::Extraction {
            document: document.into(),
            message: message.into(),
        }
    }

    /// Create a new missing-label error for the given document.
    pub fn missing_label<S: Into<String>>(document: S) -> Self {
        KentronError::MissingLabel(document.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KentronError::Analysis(msg.into())
    }

    /// Create a new invalid-configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        KentronError::InvalidConfig(msg.into())
    }
}
