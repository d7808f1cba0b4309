//! Command implementations for smartcode.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod task;
mod tasks;

use crate::cli::{Cli, Command};
use crate::error::Result;
use crate::task::Task;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match &cli.command {
        Command::Debug(args) => task::cmd_task(Task::Debug, args, config),
        Command::Optimize(args) => task::cmd_task(Task::Optimize, args, config),
        Command::Explain(args) => task::cmd_task(Task::Explain, args, config),
        Command::Test(args) => task::cmd_task(Task::GenerateTests, args, config),
        Command::Tasks => tasks::cmd_tasks(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmartcodeError;
    use clap::Parser;
    use serial_test::serial;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    #[serial]
    fn tasks_command_lists_tasks() {
        dispatch(parse(&["smartcode", "tasks"])).unwrap();
    }

    #[test]
    #[serial]
    fn every_task_command_reaches_the_runner() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.py");
        let missing = missing.to_str().unwrap();

        for name in ["debug", "optimize", "explain", "test", "generate-tests"] {
            let err = dispatch(parse(&["smartcode", name, missing])).unwrap_err();
            assert!(
                matches!(err, SmartcodeError::FileNotFound(_)),
                "{} returned {:?}",
                name,
                err
            );
        }
    }
}
