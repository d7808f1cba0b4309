//! Model invocation.
//!
//! The inference process is treated as a synchronous peer over standard
//! streams: spawn, write the whole prompt, close stdin, read stdout and
//! stderr to the end, inspect the exit status. One attempt per call; no
//! timeout, no retry, no streaming.
//!
//! Callers depend on the [`ModelInvoker`] trait so tests can substitute a
//! fake for the real [`ProcessInvoker`].

mod process;

pub use process::ProcessInvoker;

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Sends a prompt to a model and returns its complete response.
pub trait ModelInvoker {
    fn invoke(&self, prompt: &str, model: &str) -> Result<String, InvocationError>;
}

/// Why an invocation produced no usable response.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The command template could not be turned into an argument list.
    #[error("invalid inference command: {0}")]
    Command(String),

    /// The inference binary could not be started.
    #[error("failed to start '{program}': {source}\nFix: ensure the command is installed and in PATH.")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Writing the prompt or collecting output failed.
    #[error("failed to communicate with '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("model process {}:\n{}", describe_exit(.exit_code), describe_stderr(.stderr))]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The process exited successfully without writing anything.
    #[error("model process exited successfully but produced no output")]
    EmptyResponse,
}

fn describe_exit(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> &str {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "(no error output)"
    } else {
        trimmed
    }
}

/// Everything captured from one run of the inference process.
#[derive(Debug, Clone)]
pub struct InvocationOutput {
    /// Exit code (None if the process was killed by a signal).
    pub exit_code: Option<i32>,
    /// Raw bytes written to stdout.
    pub stdout: Vec<u8>,
    /// Raw bytes written to stderr.
    pub stderr: Vec<u8>,
    /// Wall time from spawn to exit.
    pub duration: Duration,
}

impl InvocationOutput {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Classify the run and extract the response text.
    ///
    /// Success requires exit status 0 and non-empty output, which is then
    /// accepted verbatim. The text is decoded permissively: invalid UTF-8
    /// becomes U+FFFD.
    pub fn into_response(self) -> Result<String, InvocationError> {
        if !self.is_success() {
            return Err(InvocationError::Failed {
                exit_code: self.exit_code,
                stderr: String::from_utf8_lossy(&self.stderr).into_owned(),
            });
        }

        if self.stdout.is_empty() {
            return Err(InvocationError::EmptyResponse);
        }

        Ok(String::from_utf8_lossy(&self.stdout).into_owned())
    }
}
