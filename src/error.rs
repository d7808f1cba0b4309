//! Error types for the smartcode CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for smartcode operations.
///
/// Each variant maps to an exit code in [`exit_codes`]. Invocation problems
/// are carried as [`crate::invoke::InvocationError`] until the command layer
/// decides the run failed, at which point they become `InvocationFailed`.
#[derive(Error, Debug)]
pub enum SmartcodeError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// The source file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The source file exists but could not be read as UTF-8 text.
    #[error("cannot read '{}': {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// The rendered prompt exceeds the configured `max_prompt_bytes`.
    #[error(
        "prompt for '{}' is {size} bytes, over the configured limit of {limit} bytes",
        .path.display()
    )]
    PromptTooLarge {
        path: PathBuf,
        size: usize,
        limit: usize,
    },

    /// The configuration file is missing, malformed, or fails validation.
    #[error("{0}")]
    ConfigError(String),

    /// The model run did not produce a report.
    #[error("{task} failed: {reason}")]
    InvocationFailed { task: String, reason: String },

    /// The report file could not be written.
    #[error("failed to write report '{}': {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },
}

impl SmartcodeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SmartcodeError::UserError(_)
            | SmartcodeError::FileNotFound(_)
            | SmartcodeError::Unreadable { .. }
            | SmartcodeError::PromptTooLarge { .. }
            | SmartcodeError::ConfigError(_) => exit_codes::USER_ERROR,
            SmartcodeError::InvocationFailed { .. } => exit_codes::INVOCATION_FAILURE,
            SmartcodeError::WriteFailure { .. } => exit_codes::WRITE_FAILURE,
        }
    }
}

/// Result type alias for smartcode operations.
pub type Result<T> = std::result::Result<T, SmartcodeError>;
