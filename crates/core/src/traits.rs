//! Core trait for word index abstraction
//!
//! This module defines the WordIndex trait implemented by both the
//! balanced tree index and the hash table index, so ingestion and query
//! code never depend on a concrete structure.

use crate::types::{DocumentId, WordEntry};

/// Inverted index from normalized words to per-document counts
///
/// Implementations own every [`WordEntry`] reachable from them. All
/// mutating methods restore the structure's invariants before returning.
///
/// # Examples
///
/// ```ignore
/// use wordindex_core::{DocumentId, WordIndex};
///
/// fn count(index: &impl WordIndex, word: &str, doc: &DocumentId) -> u32 {
///     index.lookup(word).map(|e| e.count_in(doc)).unwrap_or(0)
/// }
/// ```
pub trait WordIndex {
    /// Short human-readable name of the structure (used in reports)
    fn name(&self) -> &'static str;

    /// Record one observation of `word` in `document`
    ///
    /// `word` must already be normalized. Repeats increment the count.
    fn observe(&mut self, word: &str, document: &DocumentId);

    /// Look up a word
    ///
    /// Case-insensitive. Returns None if the word was never observed or
    /// has been removed.
    fn lookup(&self, word: &str) -> Option<&WordEntry>;

    /// Remove every record of a word
    ///
    /// Returns the removed entry, or None if the word was absent.
    fn remove(&mut self, word: &str) -> Option<WordEntry>;

    /// Number of distinct words currently indexed
    fn unique_count(&self) -> usize;

    /// Check if the index holds no words
    fn is_empty(&self) -> bool {
        self.unique_count() == 0
    }
}
