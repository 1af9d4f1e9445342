//! Clap command definition.
//!
//! Builds the `clap::Command` for the `wordindex` binary. Query lines are
//! read afterwards (REPL or pipe) and are not parsed by clap.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the CLI command.
pub fn build_cli() -> Command {
    Command::new("wordindex")
        .about("Index text documents into an AVL tree and a hash table, then query both")
        .arg(
            Arg::new("files")
                .help("Documents to index (the path is the document name)")
                .value_name("FILE")
                .num_args(1..)
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("index")
                .long("index")
                .help("Which index answers queries")
                .value_parser(["tree", "hash", "both"])
                .default_value("both"),
        )
        .arg(
            Arg::new("match")
                .long("match")
                .help("any: report every document holding a query word; all: only documents holding every word")
                .value_parser(["any", "all"])
                .default_value("any"),
        )
        .arg(
            Arg::new("split")
                .long("split")
                .help("How document text is cut into words")
                .value_parser(["non-alphabetic", "whitespace"])
                .default_value("non-alphabetic"),
        )
        .arg(
            Arg::new("initial-capacity")
                .long("initial-capacity")
                .help("Initial hash table length (rounded up to a prime)")
                .value_parser(value_parser!(usize))
                .default_value("53"),
        )
        .arg(
            Arg::new("max-load-factor")
                .long("max-load-factor")
                .help("Hash table load factor that triggers a rehash")
                .value_parser(value_parser!(f64))
                .default_value("0.75"),
        )
        .arg(
            Arg::new("timing")
                .long("timing")
                .help("Time repeated lookups of every query on each index")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("repetitions")
                .long("repetitions")
                .help("Lookup repetitions per query when timing")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("20"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log rehashes (-v) and per-document ingestion (-vv)")
                .action(ArgAction::Count),
        )
}
