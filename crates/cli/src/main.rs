//! wordindex: index text documents, then answer word queries.
//!
//! Every file is indexed into an AVL tree and a hash table. Query lines are
//! then read:
//! - **REPL mode**: interactive prompt (if stdin is a TTY)
//! - **Pipe mode**: `echo "the cat" | wordindex a.txt`, line-by-line from stdin

mod commands;
mod format;
mod parse;
mod repl;
mod state;
mod timing;

use std::io::IsTerminal;
use std::process;

use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_summary, OutputMode};
use parse::settings_from_matches;
use state::SessionState;

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let settings = match settings_from_matches(&matches) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format_error(&e, OutputMode::Human));
            process::exit(2);
        }
    };
    let mode = settings.mode;

    let mut state = match SessionState::open(&settings) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    };
    println!("{}", format_summary(&state.stats(), mode));

    if io_is_tty() {
        repl::run_repl(&mut state, mode);
    } else {
        let code = repl::run_pipe(&mut state, mode);
        process::exit(code);
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn io_is_tty() -> bool {
    std::io::stdin().is_terminal()
}
