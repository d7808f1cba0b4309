//! Run log.
//!
//! When `run_log` is configured, every run appends NDJSON records (one JSON
//! object per line) describing when it started and how it ended.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `task_start`, `task_complete`, or `task_failed`
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `task`: Task name (`debug`, `optimize`, `explain`, `test`)
//! - `details`: Freeform object (model, source, output path or reason, duration)

use crate::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// A task is about to invoke the model.
    TaskStart,
    /// A report was written.
    TaskComplete,
    /// The run ended without a report.
    TaskFailed,
}

/// An event record for the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    pub task: String,
    pub details: Value,
}

impl Event {
    /// Create an event stamped with the current time and actor.
    pub fn new(action: EventAction, task: Task) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            task: task.name().to_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// `USER@HOSTNAME` of the current process.
fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the log at `path`, creating the file and its
/// directory if needed.
pub fn append_event(path: &Path, event: &Event) -> io::Result<()> {
    let json_line = event.to_ndjson_line().map_err(io::Error::other)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json_line)
}
