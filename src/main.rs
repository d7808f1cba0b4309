//! Smartcode: run a local language model over a source file.
//!
//! This is the main entry point for the `smartcode` CLI. It parses arguments,
//! sets up diagnostics, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod invoke;
mod logging;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod task;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose, cli.quiet);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
