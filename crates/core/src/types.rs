//! Core types for the word index
//!
//! This module defines the records shared by both index structures:
//! - DocumentId: opaque identifier of an ingested document
//! - DocumentOccurrence: one document's occurrence count for a word
//! - WordEntry: per-word record aggregating every document the word occurs in

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// DocumentId
// ============================================================================

/// Identifier of an ingested document
///
/// The CLI uses the file path exactly as the user typed it. Ordering is
/// lexicographic, which is also the order query results are grouped in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a new document identifier
    pub fn new(id: impl Into<String>) -> Self {
        DocumentId(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        DocumentId(s)
    }
}

// ============================================================================
// DocumentOccurrence
// ============================================================================

/// Occurrence count of one word in one document
///
/// Owned by exactly one [`WordEntry`]. `count` is at least 1 for every
/// occurrence reachable from an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOccurrence {
    /// Document the word was observed in
    pub document: DocumentId,
    /// Number of times the word was observed in `document`
    pub count: u32,
}

impl DocumentOccurrence {
    /// Create the first occurrence of a word in a document
    pub fn first(document: DocumentId) -> Self {
        DocumentOccurrence { document, count: 1 }
    }
}

// ============================================================================
// WordEntry
// ============================================================================

/// Per-word record: the normalized word plus its document occurrences
///
/// Occurrences are kept in first-seen order. A document appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    word: String,
    occurrences: Vec<DocumentOccurrence>,
}

impl WordEntry {
    /// Create an entry with no occurrences yet
    ///
    /// The tree index inserts the bare key first and attaches the first
    /// occurrence afterwards through [`WordEntry::record`].
    pub fn new(word: impl Into<String>) -> Self {
        WordEntry {
            word: word.into(),
            occurrences: Vec::new(),
        }
    }

    /// Create an entry holding a single occurrence in `document`
    pub fn with_first(word: impl Into<String>, document: DocumentId) -> Self {
        WordEntry {
            word: word.into(),
            occurrences: vec![DocumentOccurrence::first(document)],
        }
    }

    /// The normalized word this entry is keyed by
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Occurrences in first-seen order
    pub fn occurrences(&self) -> &[DocumentOccurrence] {
        &self.occurrences
    }

    /// Record one more observation of this word in `document`
    ///
    /// Increments the existing count, or appends a new occurrence with
    /// count 1. Returns the count after the update.
    pub fn record(&mut self, document: &DocumentId) -> u32 {
        match self
            .occurrences
            .iter_mut()
            .find(|o| &o.document == document)
        {
            Some(occurrence) => {
                occurrence.count += 1;
                occurrence.count
            }
            None => {
                self.occurrences
                    .push(DocumentOccurrence::first(document.clone()));
                1
            }
        }
    }

    /// Count for `document`, or 0 when the word never occurred there
    pub fn count_in(&self, document: &DocumentId) -> u32 {
        self.occurrences
            .iter()
            .find(|o| &o.document == document)
            .map(|o| o.count)
            .unwrap_or(0)
    }

    /// Number of distinct documents containing this word
    pub fn document_count(&self) -> usize {
        self.occurrences.len()
    }

    /// Sum of counts across all documents
    pub fn total_count(&self) -> u64 {
        self.occurrences.iter().map(|o| u64::from(o.count)).sum()
    }

    /// Occurrences as (document, count) pairs sorted by document
    ///
    /// Two indexes may record documents in different orders after a
    /// replay; this view is what cross-index comparisons use.
    pub fn sorted_counts(&self) -> Vec<(DocumentId, u32)> {
        let mut counts: Vec<_> = self
            .occurrences
            .iter()
            .map(|o| (o.document.clone(), o.count))
            .collect();
        counts.sort();
        counts
    }
}
