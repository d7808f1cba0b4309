//! CLI argument parsing for smartcode.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Smartcode: send a source file to a local language model and save its analysis.
///
/// Each task renders a prompt around the file, runs the model once through
/// `ollama run <model>`, and writes the response next to the file as
/// `<name>_<suffix>.txt`.
#[derive(Parser, Debug)]
#[command(name = "smartcode")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML configuration file (optional).
    #[arg(long, global = true, env = "SMARTCODE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for smartcode.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find errors in a file and propose a corrected version.
    ///
    /// Writes `<name>_debug.txt` with ERRORS FOUND, SOLUTIONS and
    /// CORRECTED CODE sections.
    Debug(TaskArgs),

    /// Suggest performance and design improvements for a file.
    ///
    /// Writes `<name>_optimized.txt`.
    Optimize(TaskArgs),

    /// Explain what a file does.
    ///
    /// Writes `<name>_explanation.txt`.
    Explain(TaskArgs),

    /// Generate tests for a file.
    ///
    /// Writes `<name>_tests.txt`.
    #[command(alias = "generate-tests")]
    Test(TaskArgs),

    /// List the available tasks and the reports they produce.
    Tasks,
}

/// Arguments shared by every task command.
#[derive(Parser, Debug)]
pub struct TaskArgs {
    /// The source file to analyze.
    pub file: PathBuf,

    /// Model to run (defaults to the configured model, else llama3.2:1b).
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Print the command and prompt without running the model.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
