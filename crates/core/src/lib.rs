//! Core types and traits for wordindex
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId, DocumentOccurrence, WordEntry: the indexed records
//! - WordIndex: the trait both index structures implement
//! - Normalizer: token lower-casing and rejection
//! - Config: hash table, ingestion and query parameters
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod normalize;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use config::{ConfigError, HashTableConfig, IngestConfig, MatchMode, QueryConfig};
pub use error::{Error, Result};
pub use normalize::{fold_case, normalize, tokenize, SplitMode};
pub use traits::WordIndex;
pub use types::{DocumentId, DocumentOccurrence, WordEntry};
