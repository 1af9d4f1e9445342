//! Session state: the built indexes plus query settings.
//!
//! Ingestion happens once in `SessionState::open`; afterwards every input
//! line is executed against the same indexes.

use serde_json::{json, Value};

use wordindex_core::Result;
use wordindex_search::{DualIndex, DualOutcome, IndexKind, Query, QueryEngine};

use crate::parse::{LineAction, Settings};
use crate::timing::{time_query, Timing};

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Query {
        query: Query,
        outcome: DualOutcome,
        timing: Option<Timing>,
    },
    Removed {
        word: String,
        found: bool,
    },
    Stats(Stats),
    Help,
    Quit,
}

/// Index statistics reported after ingestion and by `stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub documents: usize,
    pub unique_words: usize,
    pub load_factor: f64,
    pub capacity: usize,
    pub rehashes: usize,
    pub tombstones: usize,
    pub tree_height: i32,
}

impl Stats {
    pub fn to_json(&self) -> Value {
        json!({
            "documents": self.documents,
            "unique_words": self.unique_words,
            "load_factor": self.load_factor,
            "capacity": self.capacity,
            "rehashes": self.rehashes,
            "tombstones": self.tombstones,
            "tree_height": self.tree_height,
        })
    }
}

/// Owns the dual index and the settings that shape query output.
pub struct SessionState {
    index: DualIndex,
    engine: QueryEngine,
    targets: Vec<IndexKind>,
    timing: Option<u32>,
}

impl SessionState {
    /// Build the indexes from every readable file in `settings`.
    ///
    /// Unreadable files are logged and skipped.
    pub fn open(settings: &Settings) -> Result<Self> {
        let mut index = DualIndex::with_config(&settings.ingest)?;
        for path in &settings.files {
            match index.ingest_file(path) {
                Ok(stats) => tracing::debug!(
                    path = %path.display(),
                    accepted = stats.accepted,
                    rejected = stats.rejected,
                    "indexed file"
                ),
                Err(e) => tracing::warn!(error = %e, "skipping file"),
            }
        }
        Ok(Self::from_index(index, settings))
    }

    /// Wrap an already built index.
    pub fn from_index(index: DualIndex, settings: &Settings) -> Self {
        Self {
            index,
            engine: QueryEngine::new(settings.query.clone()),
            targets: settings.targets.clone(),
            timing: settings.timing,
        }
    }

    /// Indexes whose results are printed, tree first.
    pub fn targets(&self) -> &[IndexKind] {
        &self.targets
    }

    pub fn stats(&self) -> Stats {
        let table = self.index.table();
        Stats {
            documents: self.index.documents().len(),
            unique_words: table.unique_count(),
            load_factor: table.load_factor(),
            capacity: table.capacity(),
            rehashes: table.rehash_count(),
            tombstones: table.tombstones(),
            tree_height: self.index.tree().height(),
        }
    }

    /// Execute one parsed line.
    pub fn execute(&mut self, action: LineAction) -> Output {
        match action {
            LineAction::Query(query) => {
                let outcome = self.engine.run_both(&self.index, &query);
                let timing = self
                    .timing
                    .map(|repetitions| time_query(&self.index, &query, repetitions));
                Output::Query {
                    query,
                    outcome,
                    timing,
                }
            }
            LineAction::Remove(word) => {
                let found = self.index.remove(&word).is_some();
                Output::Removed { word, found }
            }
            LineAction::Stats => Output::Stats(self.stats()),
            LineAction::Help => Output::Help,
            LineAction::Quit => Output::Quit,
        }
    }
}
