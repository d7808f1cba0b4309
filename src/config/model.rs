//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Model used when neither `--model` nor `default_model` is given.
pub const DEFAULT_MODEL: &str = "llama3.2:1b";

/// Inference command; `{model}` is substituted per argument.
pub const DEFAULT_COMMAND: &str = "ollama run {model}";

/// Configuration for smartcode.
///
/// ```yaml
/// default_model: qwen2.5-coder:7b
/// command: "ollama run {model}"
/// environment:
///   OLLAMA_HOST: "127.0.0.1:11434"
/// max_prompt_bytes: 200000
/// prompt_templates:
///   explain: |
///     Explain {file_name} to a new team member.
///     {code}
/// run_log: .smartcode/runs.ndjson
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model name passed to the inference command.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Command template that starts the inference process.
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra environment variables for the inference process.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,

    /// Reject prompts larger than this many bytes (no limit when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_prompt_bytes: Option<usize>,

    /// Prompt template overrides keyed by task name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prompt_templates: BTreeMap<String, String>,

    /// Append an NDJSON record of every run to this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            command: default_command(),
            environment: BTreeMap::new(),
            max_prompt_bytes: None,
            prompt_templates: BTreeMap::new(),
            run_log: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}
