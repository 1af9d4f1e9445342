//! REPL loop with rustyline.
//!
//! Interactive mode: prompt and history.
//! Pipe mode: read lines from stdin, execute each.

use std::io::{self, BufRead};
use std::ops::ControlFlow;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::format::{format_error, format_output, OutputMode};
use crate::parse::parse_line;
use crate::state::{Output, SessionState};

const PROMPT: &str = "wordindex> ";

/// Run the interactive REPL.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) could not start line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);
                if execute_line(state, trimmed, mode).is_break() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: cancel the current line
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }
}

/// Run in pipe mode: read stdin line by line.
///
/// Returns the process exit code: 1 if any line failed, else 0.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let mut had_error = false;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        };
        match run_line(state, &line, mode) {
            Ok(ControlFlow::Break(())) => break,
            Ok(ControlFlow::Continue(())) => {}
            Err(()) => had_error = true,
        }
    }

    i32::from(had_error)
}

/// Execute one line, printing its output or error.
fn execute_line(state: &mut SessionState, line: &str, mode: OutputMode) -> ControlFlow<()> {
    run_line(state, line, mode).unwrap_or(ControlFlow::Continue(()))
}

fn run_line(
    state: &mut SessionState,
    line: &str,
    mode: OutputMode,
) -> Result<ControlFlow<()>, ()> {
    let action = match parse_line(line) {
        Ok(Some(action)) => action,
        Ok(None) => return Ok(ControlFlow::Continue(())),
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            return Err(());
        }
    };

    let output = state.execute(action);
    if output == Output::Quit {
        return Ok(ControlFlow::Break(()));
    }
    println!("{}", format_output(&output, state.targets(), mode));
    Ok(ControlFlow::Continue(()))
}
