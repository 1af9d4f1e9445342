//! wordindex - word occurrence index over text documents
//!
//! Every document word is recorded in two interchangeable structures, an
//! AVL tree and a quadratic-probing hash table, so their lookup cost can be
//! compared on the same content.
//!
//! # Quick Start
//!
//! ```
//! use wordindex::{DocumentId, DualIndex, Query, QueryEngine};
//!
//! let mut index = DualIndex::new();
//! index.ingest_text(&DocumentId::from("d1"), "The cat sat.");
//! index.ingest_text(&DocumentId::from("d2"), "The dog sat.");
//!
//! let outcome = QueryEngine::default().run_both(&index, &Query::parse("the sat"));
//! assert!(outcome.agree());
//! assert_eq!(outcome.hash.documents().len(), 2);
//! ```
//!
//! # Architecture
//!
//! - `wordindex-core`: shared types, normalization, configuration, errors
//! - `wordindex-index`: the two index structures behind the `WordIndex` trait
//! - `wordindex-search`: document ingestion and multi-word queries

pub use wordindex_core::*;
pub use wordindex_index::{AvlTree, HashTable, InvariantError};
pub use wordindex_search::*;
