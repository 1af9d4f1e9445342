//! Document ingestion into both index structures
//!
//! This module provides:
//! - DualIndex owning one AvlTree and one HashTable
//! - Word-at-a-time observation feeding both structures
//! - Whole-document and file ingestion with token statistics
//!
//! # Usage
//!
//! Ingestion is a single-threaded pass that must finish before queries are
//! served. Both indexes see the same observations in the same order and
//! therefore hold the same word -> document -> count mapping.

use std::fs;
use std::path::Path;
use wordindex_core::normalize::{normalize, raw_tokens};
use wordindex_core::{
    DocumentId, Error, IngestConfig, Result, SplitMode, WordEntry, WordIndex,
};
use wordindex_index::{AvlTree, HashTable};

// ============================================================================
// IndexKind
// ============================================================================

/// Selects one of the two index structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Height-balanced binary search tree
    Tree,
    /// Open-addressing hash table
    Hash,
}

impl IndexKind {
    /// Both kinds, tree first
    pub const ALL: [IndexKind; 2] = [IndexKind::Tree, IndexKind::Hash];
}

// ============================================================================
// IngestStats
// ============================================================================

/// Token counts for one ingested document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Tokens accepted by the normalizer and indexed
    pub accepted: usize,
    /// Tokens rejected by the normalizer
    pub rejected: usize,
}

// ============================================================================
// DualIndex
// ============================================================================

/// The tree index and the hash index, maintained side by side
///
/// Each structure exclusively owns its entries; nothing is shared between
/// them even though they represent the same logical content.
#[derive(Debug, Default)]
pub struct DualIndex {
    tree: AvlTree,
    table: HashTable,
    split: SplitMode,
    documents: Vec<DocumentId>,
}

impl DualIndex {
    /// Create an empty dual index with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dual index from a configuration
    pub fn with_config(config: &IngestConfig) -> Result<Self> {
        config.validate()?;
        Ok(DualIndex {
            tree: AvlTree::new(),
            table: HashTable::with_config(&config.hash_table)?,
            split: config.split,
            documents: Vec::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The tree index
    pub fn tree(&self) -> &AvlTree {
        &self.tree
    }

    /// The hash index
    pub fn table(&self) -> &HashTable {
        &self.table
    }

    /// One of the two indexes behind the common trait
    pub fn index(&self, kind: IndexKind) -> &dyn WordIndex {
        match kind {
            IndexKind::Tree => &self.tree,
            IndexKind::Hash => &self.table,
        }
    }

    /// Documents ingested so far, in ingestion order
    pub fn documents(&self) -> &[DocumentId] {
        &self.documents
    }

    /// Distinct words indexed (as reported by the hash index)
    pub fn unique_count(&self) -> usize {
        self.table.unique_count()
    }

    /// Current hash table load factor
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    // ========================================================================
    // Ingestion
    // ========================================================================

    /// Record one observation of a normalized word in both indexes
    pub fn observe(&mut self, word: &str, document: &DocumentId) {
        self.tree.observe(word, document);
        self.table.observe(word, document);
    }

    /// Tokenize a document body and observe every accepted token
    pub fn ingest_text(&mut self, document: &DocumentId, text: &str) -> IngestStats {
        let mut stats = IngestStats::default();
        for token in raw_tokens(text, self.split) {
            match normalize(token) {
                Some(word) => {
                    self.observe(&word, document);
                    stats.accepted += 1;
                }
                None => stats.rejected += 1,
            }
        }
        if !self.documents.contains(document) {
            self.documents.push(document.clone());
        }

        tracing::debug!(
            document = %document,
            accepted = stats.accepted,
            rejected = stats.rejected,
            unique_words = self.unique_count(),
            "ingested document"
        );
        stats
    }

    /// Read a file and ingest it, using the path as the document id
    ///
    /// Invalid UTF-8 is replaced rather than rejected; the replacement
    /// character is not alphabetic, so it only ever acts as a separator.
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) -> Result<IngestStats> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        let document = DocumentId::new(path.display().to_string());
        Ok(self.ingest_text(&document, &text))
    }

    /// Remove a word from both indexes
    ///
    /// Returns the hash index's removed entry; both indexes hold the same
    /// content, so the tree's copy is dropped.
    pub fn remove(&mut self, word: &str) -> Option<WordEntry> {
        let from_tree = self.tree.remove(word);
        let from_table = self.table.remove(word);
        tracing::debug!(
            word,
            removed = from_table.is_some() || from_tree.is_some(),
            "remove"
        );
        from_table.or(from_tree)
    }
}
