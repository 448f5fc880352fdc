//! Text analysis boundary.
//!
//! The classifier never inspects raw text itself; everything it knows about a
//! document's content arrives through the [`extractor::TermExtractor`] seam.

pub mod extractor;

pub use extractor::{TermExtractor, UnicodeTermExtractor};
