//! Argument and input-line parsing.
//!
//! `settings_from_matches` turns clap matches into session settings.
//! `parse_line` turns one REPL/pipe line into a `LineAction`.

use clap::ArgMatches;
use std::path::PathBuf;

use wordindex_core::{
    normalize, Error, HashTableConfig, IngestConfig, MatchMode, QueryConfig, Result, SplitMode,
};
use wordindex_search::{IndexKind, Query};

use crate::format::OutputMode;

/// Everything the session needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub ingest: IngestConfig,
    pub query: QueryConfig,
    pub targets: Vec<IndexKind>,
    /// Lookup repetitions when `--timing` is set.
    pub timing: Option<u32>,
    pub mode: OutputMode,
}

/// What to do with one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineAction {
    Query(Query),
    Remove(String),
    Stats,
    Help,
    Quit,
}

/// Resolve settings from parsed arguments.
pub fn settings_from_matches(matches: &ArgMatches) -> Result<Settings> {
    let files = matches
        .get_many::<PathBuf>("files")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();

    let targets = match arg_str(matches, "index") {
        "tree" => vec![IndexKind::Tree],
        "hash" => vec![IndexKind::Hash],
        "both" => IndexKind::ALL.to_vec(),
        other => return Err(invalid("index", other)),
    };

    let match_mode = match arg_str(matches, "match") {
        "any" => MatchMode::AllWordsIndexed,
        "all" => MatchMode::AllWordsInDocument,
        other => return Err(invalid("match", other)),
    };

    let split = match arg_str(matches, "split") {
        "non-alphabetic" => SplitMode::NonAlphabetic,
        "whitespace" => SplitMode::Whitespace,
        other => return Err(invalid("split", other)),
    };

    let mut hash_table = HashTableConfig::new();
    if let Some(capacity) = matches.get_one::<usize>("initial-capacity") {
        hash_table = hash_table.with_initial_capacity(*capacity);
    }
    if let Some(load_factor) = matches.get_one::<f64>("max-load-factor") {
        hash_table = hash_table.with_max_load_factor(*load_factor);
    }
    let ingest = IngestConfig::new()
        .with_split(split)
        .with_hash_table(hash_table);
    ingest.validate()?;

    let timing = if matches.get_flag("timing") {
        Some(matches.get_one::<u32>("repetitions").copied().unwrap_or(20))
    } else {
        None
    };

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    Ok(Settings {
        files,
        ingest,
        query: QueryConfig::new().with_match_mode(match_mode),
        targets,
        timing,
        mode,
    })
}

fn arg_str<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

fn invalid(option: &str, value: &str) -> Error {
    Error::InvalidCommand(format!("unknown --{} value '{}'", option, value))
}

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines. Command words are matched
/// case-insensitively; anything else is a query.
pub fn parse_line(line: &str) -> Result<Option<LineAction>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().map(str::trim).unwrap_or("");

    let action = match (head.as_str(), rest.is_empty()) {
        ("endofinput" | "quit" | "exit", true) => LineAction::Quit,
        ("stats", true) => LineAction::Stats,
        ("help", true) => LineAction::Help,
        ("remove", true) => {
            return Err(Error::InvalidCommand("usage: remove <word>".into()));
        }
        ("remove", false) => match normalize(rest) {
            Some(word) => LineAction::Remove(word),
            None => {
                return Err(Error::InvalidCommand(format!(
                    "'{}' is not a single alphabetic word",
                    rest
                )));
            }
        },
        _ => LineAction::Query(Query::parse(trimmed)),
    };
    Ok(Some(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;

    fn settings(args: &[&str]) -> Result<Settings> {
        let mut argv = vec!["wordindex"];
        argv.extend_from_slice(args);
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        settings_from_matches(&matches)
    }

    #[test]
    fn test_default_settings() {
        let s = settings(&["a.txt"]).unwrap();
        assert_eq!(s.files, vec![PathBuf::from("a.txt")]);
        assert_eq!(s.targets, IndexKind::ALL.to_vec());
        assert_eq!(s.query.match_mode, MatchMode::AllWordsIndexed);
        assert_eq!(s.ingest.split, SplitMode::NonAlphabetic);
        assert_eq!(s.ingest.hash_table.initial_capacity, 53);
        assert_eq!(s.timing, None);
        assert_eq!(s.mode, OutputMode::Human);
    }

    #[test]
    fn test_options_resolve() {
        let s = settings(&[
            "--index",
            "hash",
            "--match",
            "all",
            "--split",
            "whitespace",
            "--timing",
            "--repetitions",
            "5",
            "--json",
            "a.txt",
        ])
        .unwrap();
        assert_eq!(s.targets, vec![IndexKind::Hash]);
        assert_eq!(s.query.match_mode, MatchMode::AllWordsInDocument);
        assert_eq!(s.ingest.split, SplitMode::Whitespace);
        assert_eq!(s.timing, Some(5));
        assert_eq!(s.mode, OutputMode::Json);
    }

    #[test]
    fn test_invalid_load_factor_is_config_error() {
        let err = settings(&["--max-load-factor", "1.5", "a.txt"]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("endofinput").unwrap(), Some(LineAction::Quit));
        assert_eq!(parse_line("  QUIT ").unwrap(), Some(LineAction::Quit));
        assert_eq!(parse_line("stats").unwrap(), Some(LineAction::Stats));
        assert_eq!(parse_line("help").unwrap(), Some(LineAction::Help));
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(
            parse_line("remove Cat").unwrap(),
            Some(LineAction::Remove("cat".into()))
        );
        assert!(matches!(
            parse_line("remove"),
            Err(Error::InvalidCommand(_))
        ));
        assert!(matches!(
            parse_line("remove two words"),
            Err(Error::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(
            parse_line("The sat, dog").unwrap(),
            Some(LineAction::Query(Query::new(["the", "sat", "dog"])))
        );
        // command words followed by more text are queries
        assert_eq!(
            parse_line("stats matter").unwrap(),
            Some(LineAction::Query(Query::new(["stats", "matter"])))
        );
    }
}
