//! Ingestion and query infrastructure for wordindex
//!
//! This crate provides:
//! - DualIndex: feeds every observation into both index structures
//! - Query parsing from a raw query line
//! - QueryEngine: all-or-nothing multi-word lookup with per-document grouping
//!
//! # Usage
//!
//! ```
//! use wordindex_core::DocumentId;
//! use wordindex_search::{DualIndex, Query, QueryEngine};
//!
//! let mut index = DualIndex::new();
//! index.ingest_text(&DocumentId::from("d1"), "the cat sat");
//! index.ingest_text(&DocumentId::from("d2"), "the dog sat");
//!
//! let outcome = QueryEngine::default().run_both(&index, &Query::parse("the sat"));
//! assert!(outcome.agree());
//! assert_eq!(outcome.tree.documents().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ingest;
pub mod query;

// Re-export commonly used types
pub use ingest::{DualIndex, IndexKind, IngestStats};
pub use query::{DocumentMatch, DualOutcome, Query, QueryEngine, QueryOutcome, WordCount};
