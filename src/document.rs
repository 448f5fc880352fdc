//! Document model for classification.
//!
//! A [`Document`] carries an opaque raw text, an optional category label and,
//! once term extraction has run, a multiset of normalized terms. Feature
//! vectors are never stored on the document itself; they are recomputed from
//! the term counts by the vectorizer.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single document, labeled or unlabeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document name, unique within a corpus.
    pub name: String,
    /// Source path, when the document was loaded from disk.
    pub path: Option<PathBuf>,
    /// Raw text. Opaque to the classifier; only the term extraction seam
    /// reads it.
    pub text: String,
    /// Category label. Present for training and evaluation documents,
    /// absent for pure inference.
    pub category: Option<String>,
    /// Term occurrence counts produced by term extraction.
    pub term_count: HashMap<String, u64>,
}

impl Document {
    /// Create an unlabeled document.
    pub fn new<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        Document {
            name: name.into(),
            path: None,
            text: text.into(),
            category: None,
            term_count: HashMap::new(),
        }
    }

    /// Create a labeled document.
    pub fn with_category<S: Into<String>, T: Into<String>, C: Into<String>>(
        name: S,
        text: T,
        category: C,
    ) -> Self {
        Document {
            category: Some(category.into()),
            ..Document::new(name, text)
        }
    }

    /// Replace the term counts, e.g. with the output of an external
    /// linguistic pipeline.
    pub fn set_term_count(&mut self, term_count: HashMap<String, u64>) {
        self.term_count = term_count;
    }

    /// Total number of term occurrences in this document.
    pub fn total_terms(&self) -> u64 {
        self.term_count.values().sum()
    }

    /// Number of distinct terms in this document.
    pub fn distinct_terms(&self) -> usize {
        self.term_count.len()
    }
}

/// Load a corpus from a directory containing one sub-directory per category:
/// `<root>/<category>/<document>`.
///
/// Hidden files are skipped. Entries are visited in name order so repeated
/// loads produce the same document order.
pub fn load_corpus_from_subdirs<P: AsRef<Path>>(root: P) -> Result<Vec<Document>> {
    let root = root.as_ref();
    let mut documents = Vec::new();

    for dir in sorted_entries(root)? {
        if !dir.is_dir() {
            continue;
        }
        let category = match dir.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        for file in sorted_entries(&dir)? {
            if !file.is_file() || is_hidden(&file) {
                continue;
            }
            let name = match file.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let text = fs::read_to_string(&file)?;
            debug!("loaded document '{name}' (category '{category}')");

            documents.push(Document {
                name,
                path: Some(file.clone()),
                text,
                category: Some(category.clone()),
                term_count: HashMap::new(),
            });
        }
    }

    Ok(documents)
}

/// Load a corpus from a flat directory of files named
/// `<category>_<name>[.<extension>]`.
pub fn load_corpus_flat<P: AsRef<Path>>(root: P) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for file in sorted_entries(root.as_ref())? {
        if !file.is_file() || is_hidden(&file) {
            continue;
        }
        let name = match file.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        let category = name.split('_').next().map(|c| c.to_string());
        let text = fs::read_to_string(&file)?;
        debug!("loaded document '{name}' (category {category:?})");

        documents.push(Document {
            name,
            path: Some(file.clone()),
            text,
            category,
            term_count: HashMap::new(),
        });
    }

    Ok(documents)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_term_totals() {
        let mut doc = Document::with_category("doc1", "cat cat dog", "animals");
        doc.set_term_count(HashMap::from([
            ("cat".to_string(), 2),
            ("dog".to_string(), 1),
        ]));

        assert_eq!(doc.total_terms(), 3);
        assert_eq!(doc.distinct_terms(), 2);
        assert_eq!(doc.category.as_deref(), Some("animals"));
    }

    #[test]
    fn test_empty_document_totals() {
        let doc = Document::new("empty", "");
        assert_eq!(doc.total_terms(), 0);
        assert_eq!(doc.distinct_terms(), 0);
        assert!(doc.category.is_none());
    }

    #[test]
    fn test_load_corpus_from_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        for (category, name, text) in [
            ("sport", "match.txt", "a football match"),
            ("sport", "race.txt", "a bicycle race"),
            ("finance", "stocks.txt", "stocks went up"),
        ] {
            let cat_dir = dir.path().join(category);
            fs::create_dir_all(&cat_dir).unwrap();
            fs::write(cat_dir.join(name), text).unwrap();
        }

        let documents = load_corpus_from_subdirs(dir.path()).unwrap();
        assert_eq!(documents.len(), 3);
        // Name-ordered: finance first, then sport.
        assert_eq!(documents[0].category.as_deref(), Some("finance"));
        assert_eq!(documents[1].name, "match.txt");
        assert_eq!(documents[2].name, "race.txt");
    }

    #[test]
    fn test_load_corpus_flat_extracts_category_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sport_match.txt"), "a football match").unwrap();
        fs::write(dir.path().join("finance_stocks.txt"), "stocks went up").unwrap();
        fs::write(dir.path().join(".hidden"), "skip me").unwrap();

        let documents = load_corpus_flat(dir.path()).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].category.as_deref(), Some("finance"));
        assert_eq!(documents[1].category.as_deref(), Some("sport"));
    }
}
