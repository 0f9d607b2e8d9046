//! Checks candidate strings against a context-free grammar.
//!
//! ```text
//! cfg-check grammar.txt strings.txt --start S --cyk
//! ```
//!
//! Prints `accepted`, `rejected` or `incomplete (timeout)` for every
//! non-blank line, followed by the derivation when one is tracked.
//! Set `RUST_LOG=debug` for engine statistics.

mod cli;
mod error;
mod report;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;

use clap::Parser;
use log::{debug, warn};

use cfg_membership::{Recognizer, Verdict};

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(all_decided) => {
            if !all_decided {
                process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("error: {}", error);
            process::exit(error.exit_code());
        }
    }
}

/// Returns whether every string got a definite verdict.
fn run(cli: &Cli) -> Result<bool, CliError> {
    let text = read_file(&cli.grammar)?;
    let recognizer = Recognizer::from_text(&text, cli.config())?;
    for warning in recognizer.warnings() {
        warn!("{}", warning);
    }
    let start = recognizer.start_symbol(&cli.start)?;
    for sym in recognizer.analysis().unreachable(start) {
        debug!("`{}` is unreachable from `{}`", recognizer.grammar().name(sym), cli.start);
    }

    let candidates = match &cli.strings {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(CliError::Stdin)?;
            buf
        }
    };
    let inputs: Vec<String> = candidates
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    let results = recognizer.recognize_batch(&cli.start, &inputs)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        report::write_json(&mut out, &inputs, &results)?;
    } else {
        report::write_text(&mut out, &inputs, &results).map_err(CliError::Write)?;
    }
    Ok(results
        .iter()
        .all(|result| result.verdict() != Verdict::Incomplete))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
