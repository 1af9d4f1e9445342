//! Index and query configuration.
//!
//! Each component takes a small plain config struct with builder-style
//! setters and a `validate()` that rejects unusable values up front.

use crate::normalize::SplitMode;
use serde::{Deserialize, Serialize};

/// Default initial hash table length (prime).
pub const DEFAULT_INITIAL_CAPACITY: usize = 53;

/// Default hash table load factor threshold.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

// ============================================================================
// HashTableConfig
// ============================================================================

/// Hash table configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashTableConfig {
    /// Initial table length (default: 53).
    ///
    /// Rounded up to the next prime when the table is created.
    pub initial_capacity: usize,

    /// Load factor threshold (default: 0.75).
    ///
    /// An insertion that leaves `active / length` above this value
    /// rehashes the table before returning.
    pub max_load_factor: f64,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        HashTableConfig {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl HashTableConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set initial capacity (builder pattern).
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set load factor threshold (builder pattern).
    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity < 2 {
            return Err(ConfigError::CapacityTooSmall(self.initial_capacity));
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(ConfigError::LoadFactorOutOfRange(self.max_load_factor));
        }
        Ok(())
    }

    /// Create a configuration optimized for testing (tiny table, frequent rehash).
    pub fn for_testing() -> Self {
        HashTableConfig {
            initial_capacity: 5,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

// ============================================================================
// IngestConfig
// ============================================================================

/// Document ingestion configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// How document text is cut into tokens (default: non-alphabetic).
    pub split: SplitMode,

    /// Hash table parameters for the hash index.
    pub hash_table: HashTableConfig,
}

impl IngestConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set split mode (builder pattern).
    pub fn with_split(mut self, split: SplitMode) -> Self {
        self.split = split;
        self
    }

    /// Set hash table parameters (builder pattern).
    pub fn with_hash_table(mut self, hash_table: HashTableConfig) -> Self {
        self.hash_table = hash_table;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hash_table.validate()
    }
}

// ============================================================================
// QueryConfig
// ============================================================================

/// Which documents a satisfiable query reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Every query word must exist in the index; then every document
    /// containing at least one of them is reported.
    #[default]
    AllWordsIndexed,
    /// A document is reported only if it contains every query word.
    AllWordsInDocument,
}

/// Query evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Document selection rule (default: all words indexed).
    pub match_mode: MatchMode,
}

impl QueryConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set match mode (builder pattern).
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Initial capacity is below the minimum of 2.
    #[error("Initial capacity must be at least 2, got {0}")]
    CapacityTooSmall(usize),

    /// Load factor threshold is outside the open interval (0, 1).
    #[error("Max load factor must be in (0, 1), got {0}")]
    LoadFactorOutOfRange(f64),
}
