//! Multi-word queries over a word index
//!
//! This module provides:
//! - Query: normalized query words parsed from a raw line
//! - QueryEngine: lookup and per-document aggregation
//! - QueryOutcome: unsatisfiable, or matches grouped by document then word
//!
//! A query is all-or-nothing: if any word is missing from the index the
//! whole query is unsatisfiable. Query word order does not matter; output
//! is grouped by document id, then by word, both ascending.

use crate::ingest::{DualIndex, IndexKind};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use wordindex_core::{
    fold_case, tokenize, DocumentId, MatchMode, QueryConfig, SplitMode, WordIndex,
};

// ============================================================================
// Query
// ============================================================================

/// An ordered list of normalized query words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    words: Vec<String>,
}

impl Query {
    /// Build a query from words, lower-casing each
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Query {
            words: words
                .into_iter()
                .map(|w| fold_case(w.as_ref()).into_owned())
                .collect(),
        }
    }

    /// Parse a raw query line
    ///
    /// Every non-alphabetic character separates words.
    pub fn parse(line: &str) -> Self {
        Query {
            words: tokenize(line, SplitMode::NonAlphabetic),
        }
    }

    /// Query words in input order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Check if the query has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// ============================================================================
// QueryOutcome
// ============================================================================

/// Accumulated count of one query word in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// Query word
    pub word: String,
    /// Occurrences in the document
    pub count: u64,
}

/// All query words found in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMatch {
    /// Matching document
    pub document: DocumentId,
    /// Per-word counts, ascending by word
    pub words: Vec<WordCount>,
}

/// Result of evaluating a query against one index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "documents", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// At least one query word is absent from the index
    Unsatisfiable,
    /// Matching documents, ascending by document id
    Matches(Vec<DocumentMatch>),
}

impl QueryOutcome {
    /// Matching documents (empty when unsatisfiable)
    pub fn documents(&self) -> &[DocumentMatch] {
        match self {
            QueryOutcome::Unsatisfiable => &[],
            QueryOutcome::Matches(docs) => docs,
        }
    }

    /// Check if at least one document matched
    pub fn has_matches(&self) -> bool {
        !self.documents().is_empty()
    }
}

/// Outcomes of the same query on both indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DualOutcome {
    /// Outcome on the tree index
    pub tree: QueryOutcome,
    /// Outcome on the hash index
    pub hash: QueryOutcome,
}

impl DualOutcome {
    /// Outcome for one index kind
    pub fn get(&self, kind: IndexKind) -> &QueryOutcome {
        match kind {
            IndexKind::Tree => &self.tree,
            IndexKind::Hash => &self.hash,
        }
    }

    /// Check if both indexes produced the same answer
    pub fn agree(&self) -> bool {
        self.tree == self.hash
    }
}

// ============================================================================
// QueryEngine
// ============================================================================

/// Evaluates queries against any [`WordIndex`]
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    config: QueryConfig,
}

impl QueryEngine {
    /// Create an engine with the given configuration
    pub fn new(config: QueryConfig) -> Self {
        QueryEngine { config }
    }

    /// Configured match mode
    pub fn match_mode(&self) -> MatchMode {
        self.config.match_mode
    }

    /// Evaluate a query against one index
    ///
    /// Repeated query words accumulate their counts once per repetition.
    pub fn run(&self, index: &dyn WordIndex, query: &Query) -> QueryOutcome {
        let mut entries = Vec::with_capacity(query.words().len());
        for word in query.words() {
            match index.lookup(word) {
                Some(entry) => entries.push(entry),
                None => return QueryOutcome::Unsatisfiable,
            }
        }

        let mut grouped: BTreeMap<&DocumentId, BTreeMap<&str, u64>> = BTreeMap::new();
        for entry in &entries {
            for occurrence in entry.occurrences() {
                *grouped
                    .entry(&occurrence.document)
                    .or_default()
                    .entry(entry.word())
                    .or_default() += u64::from(occurrence.count);
            }
        }

        if self.config.match_mode == MatchMode::AllWordsInDocument {
            let distinct: BTreeSet<&str> = entries.iter().map(|e| e.word()).collect();
            grouped.retain(|_, words| words.len() == distinct.len());
        }

        QueryOutcome::Matches(
            grouped
                .into_iter()
                .map(|(document, words)| DocumentMatch {
                    document: document.clone(),
                    words: words
                        .into_iter()
                        .map(|(word, count)| WordCount {
                            word: word.to_string(),
                            count,
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    /// Evaluate a query against both indexes of a [`DualIndex`]
    pub fn run_both(&self, index: &DualIndex, query: &Query) -> DualOutcome {
        DualOutcome {
            tree: self.run(index.index(IndexKind::Tree), query),
            hash: self.run(index.index(IndexKind::Hash), query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> DocumentId {
        DocumentId::from(name)
    }

    fn sample() -> DualIndex {
        let mut index = DualIndex::new();
        index.ingest_text(&doc("d1"), "the cat sat");
        index.ingest_text(&doc("d2"), "the dog sat");
        index
    }

    fn counts(outcome: &QueryOutcome) -> Vec<(&str, Vec<(&str, u64)>)> {
        outcome
            .documents()
            .iter()
            .map(|m| {
                (
                    m.document.as_str(),
                    m.words.iter().map(|w| (w.word.as_str(), w.count)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_parse_splits_and_lowercases() {
        let query = Query::parse("The  CAT,sat");
        assert_eq!(query.words(), &["the", "cat", "sat"]);
    }

    #[test]
    fn test_new_folds_case() {
        let query = Query::new(["Fox", "dog"]);
        assert_eq!(query.words(), &["fox", "dog"]);
    }

    #[test]
    fn test_all_words_present_reports_both_documents() {
        let index = sample();
        let outcome = QueryEngine::default().run(index.tree(), &Query::parse("the sat"));
        assert_eq!(
            counts(&outcome),
            vec![
                ("d1", vec![("sat", 1), ("the", 1)]),
                ("d2", vec![("sat", 1), ("the", 1)]),
            ]
        );
    }

    #[test]
    fn test_missing_word_is_unsatisfiable() {
        let index = sample();
        let outcome = QueryEngine::default().run(index.table(), &Query::parse("the fox"));
        assert_eq!(outcome, QueryOutcome::Unsatisfiable);
        assert!(!outcome.has_matches());
    }

    #[test]
    fn test_any_document_mode_reports_partial_documents() {
        let index = sample();
        let outcome = QueryEngine::default().run(index.tree(), &Query::parse("cat dog"));
        assert_eq!(
            counts(&outcome),
            vec![
                ("d1", vec![("cat", 1)]),
                ("d2", vec![("dog", 1)]),
            ]
        );
    }

    #[test]
    fn test_all_words_in_document_mode_filters() {
        let index = sample();
        let engine =
            QueryEngine::new(QueryConfig::new().with_match_mode(MatchMode::AllWordsInDocument));

        let outcome = engine.run(index.tree(), &Query::parse("cat dog"));
        assert_eq!(outcome, QueryOutcome::Matches(vec![]));

        let outcome = engine.run(index.tree(), &Query::parse("cat the"));
        assert_eq!(
            counts(&outcome),
            vec![("d1", vec![("cat", 1), ("the", 1)])]
        );
    }

    #[test]
    fn test_repeated_query_word_accumulates() {
        let index = sample();
        let outcome = QueryEngine::default().run(index.tree(), &Query::parse("cat cat"));
        assert_eq!(counts(&outcome), vec![("d1", vec![("cat", 2)])]);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let index = sample();
        let outcome = QueryEngine::default().run(index.tree(), &Query::parse("  123 "));
        assert_eq!(outcome, QueryOutcome::Matches(vec![]));
    }

    #[test]
    fn test_run_both_agrees() {
        let index = sample();
        let both = QueryEngine::default().run_both(&index, &Query::parse("sat"));
        assert!(both.agree());
        assert_eq!(both.get(IndexKind::Hash), &both.hash);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let index = sample();
        let outcome = QueryEngine::default().run(index.tree(), &Query::parse("cat"));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "matches");
        assert_eq!(json["documents"][0]["document"], "d1");
        assert_eq!(json["documents"][0]["words"][0]["count"], 1);

        let json = serde_json::to_value(QueryOutcome::Unsatisfiable).unwrap();
        assert_eq!(json["status"], "unsatisfiable");
    }
}
