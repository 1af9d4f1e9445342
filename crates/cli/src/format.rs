//! Output → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): one `in Document ...` line per matching document
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use serde_json::{json, Value};

use wordindex_core::Error;
use wordindex_search::{DocumentMatch, IndexKind, QueryOutcome};

use crate::state::{Output, Stats};
use crate::timing::Timing;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Line printed when an index cannot answer a query.
pub const NO_MATCH: &str = "No document contains the given query";

/// Format a successful output for the selected indexes.
pub fn format_output(output: &Output, targets: &[IndexKind], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&output_json(output, targets)),
        OutputMode::Human => format_human(output, targets),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({ "error": err.to_string() })),
        OutputMode::Human => format!("(error) {}", err),
    }
}

/// Summary line printed once ingestion finishes.
pub fn format_summary(stats: &Stats, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&stats.to_json()),
        OutputMode::Human => format!(
            "After preprocessing, the unique word count is {}. Current load ratio is {}",
            stats.unique_words, stats.load_factor
        ),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn kind_label(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::Tree => "AVL tree",
        IndexKind::Hash => "hash table",
    }
}

fn kind_key(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::Tree => "tree",
        IndexKind::Hash => "hash",
    }
}

// =========================================================================
// Human formatting
// =========================================================================

fn format_human(output: &Output, targets: &[IndexKind]) -> String {
    match output {
        Output::Query {
            outcome, timing, ..
        } => {
            let mut lines = Vec::new();
            for &kind in targets {
                if targets.len() > 1 {
                    lines.push(format!("[{}]", kind_label(kind)));
                }
                lines.extend(outcome_lines(outcome.get(kind)));
            }
            if let Some(timing) = timing {
                lines.extend(timing_lines(timing));
            }
            lines.join("\n")
        }
        Output::Removed { word, found: true } => format!("{} has been REMOVED", word),
        Output::Removed { word, found: false } => format!("{} is not indexed", word),
        Output::Stats(stats) => [
            format_summary(stats, OutputMode::Human),
            format!("documents: {}", stats.documents),
            format!(
                "hash table: capacity {}, {} rehashes, {} tombstones",
                stats.capacity, stats.rehashes, stats.tombstones
            ),
            format!("AVL tree height: {}", stats.tree_height),
        ]
        .join("\n"),
        Output::Help => HELP.to_string(),
        Output::Quit => String::new(),
    }
}

fn outcome_lines(outcome: &QueryOutcome) -> Vec<String> {
    if !outcome.has_matches() {
        return vec![NO_MATCH.to_string()];
    }
    outcome.documents().iter().map(document_line).collect()
}

fn document_line(matched: &DocumentMatch) -> String {
    let words = matched
        .words
        .iter()
        .map(|w| format!("{} found {} times", w.word, w.count))
        .collect::<Vec<_>>()
        .join(", ");
    format!("in Document {}, {}.", matched.document, words)
}

fn timing_lines(timing: &Timing) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} time: {:.0} ns (average of {} runs)",
            kind_label(IndexKind::Tree),
            timing.tree_ns,
            timing.repetitions
        ),
        format!(
            "{} time: {:.0} ns (average of {} runs)",
            kind_label(IndexKind::Hash),
            timing.hash_ns,
            timing.repetitions
        ),
    ];
    if let Some(speedup) = timing.speedup() {
        lines.push(format!("Speed up: {:.2}", speedup));
    }
    lines
}

const HELP: &str = "\
Enter one or more words to find the documents containing them.
Commands:
  remove <word>               remove a word from both indexes
  stats                       show index statistics
  help                        show this help
  endofinput | quit | exit    leave";

// =========================================================================
// JSON formatting
// =========================================================================

fn output_json(output: &Output, targets: &[IndexKind]) -> Value {
    match output {
        Output::Query {
            query,
            outcome,
            timing,
        } => {
            let mut results = serde_json::Map::new();
            for &kind in targets {
                results.insert(
                    kind_key(kind).to_string(),
                    serde_json::to_value(outcome.get(kind)).unwrap_or(Value::Null),
                );
            }
            let mut value = json!({
                "query": query.words(),
                "results": results,
            });
            if let Some(t) = timing {
                value["timing"] = json!({
                    "repetitions": t.repetitions,
                    "tree_ns": t.tree_ns,
                    "hash_ns": t.hash_ns,
                    "speedup": t.speedup(),
                });
            }
            value
        }
        Output::Removed { word, found } => json!({ "removed": word, "found": found }),
        Output::Stats(stats) => stats.to_json(),
        Output::Help => json!({ "help": HELP }),
        Output::Quit => Value::Null,
    }
}
