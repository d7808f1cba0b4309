//! The shared task runner.
//!
//! One runner drives every task through the same sequence:
//!
//! ```text
//! Idle -> Reading -> Invoking -> Writing -> Done
//!            |          |
//!            +----------+--------> Failed
//! ```
//!
//! A problem with the input (missing file, not UTF-8, prompt over the size
//! limit) is returned as an error before the model is contacted. A failed
//! invocation is not an error: it becomes [`TaskOutcome::Failed`] and no
//! report is written. A report is written if and only if the model returned
//! a response.


use crate::error::Result;
use crate::invoke::ModelInvoker;
use crate::prompt::{PromptBuilder, read_source};
use crate::report::write_report;
use crate::task::Task;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single request from the CLI.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub source_path: PathBuf,
    pub model: String,
    pub task: Task,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The report was written to `output_path`.
    Completed { output_path: PathBuf },
    /// The model could not produce a response; nothing was written.
    Failed { reason: String },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Completed { .. })
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            TaskOutcome::Completed { output_path } => Some(output_path),
            TaskOutcome::Failed { .. } => None,
        }
    }
}

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Reading,
    Invoking,
    Writing,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Reading => "reading",
            RunState::Invoking => "invoking",
            RunState::Writing => "writing",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Drives prompt building, model invocation, and report writing.
pub struct TaskRunner<'a, I: ModelInvoker + ?Sized> {
    invoker: &'a I,
    prompts: &'a PromptBuilder,
    state: RunState,
}

impl<'a, I: ModelInvoker + ?Sized> TaskRunner<'a, I> {
    pub fn new(invoker: &'a I, prompts: &'a PromptBuilder) -> Self {
        Self {
            invoker,
            prompts,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Read the source file and render its prompt without invoking the model.
    pub fn prepare(&mut self, request: &InvocationRequest) -> Result<String> {
        self.transition(RunState::Reading);

        let prompt = read_source(&request.source_path).and_then(|code| {
            self.prompts
                .build(request.task, &request.source_path, &code)
        });

        if prompt.is_err() {
            self.transition(RunState::Failed);
        }
        prompt
    }

    /// Run the request to completion.
    pub fn run(&mut self, request: &InvocationRequest) -> Result<TaskOutcome> {
        let prompt = self.prepare(request)?;
        self.complete(request, &prompt)
    }

    /// Invoke the model with a prompt from [`TaskRunner::prepare`] and write
    /// the report if it answered.
    pub fn complete(&mut self, request: &InvocationRequest, prompt: &str) -> Result<TaskOutcome> {
        self.transition(RunState::Invoking);
        let response = match self.invoker.invoke(prompt, &request.model) {
            Ok(response) => response,
            Err(err) => {
                self.transition(RunState::Failed);
                tracing::debug!(
                    task = %request.task,
                    model = %request.model,
                    error = %err,
                    "model invocation failed"
                );
                return Ok(TaskOutcome::Failed {
                    reason: err.to_string(),
                });
            }
        };

        self.transition(RunState::Writing);
        let output_path = write_report(
            &request.source_path,
            request.task.output_suffix(),
            &response,
        )
        .inspect_err(|_| self.transition(RunState::Failed))?;

        self.transition(RunState::Done);
        Ok(TaskOutcome::Completed { output_path })
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!(from = %self.state, to = %next, "task state");
        self.state = next;
    }
}
