//! Rendering task prompts.

use super::template::{PromptTemplate, TemplateError};
use crate::config::Config;
use crate::error::{Result, SmartcodeError};
use crate::task::Task;
use std::collections::HashMap;
use std::path::Path;

/// Variables a task template may reference.
pub const TEMPLATE_VARIABLES: [&str; 3] = ["code", "file_name", "task"];

/// Renders the instruction template of each task around source text.
///
/// Built-in templates are used unless the configuration overrides them. The
/// optional size limit rejects a prompt outright; content is never truncated.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    templates: HashMap<Task, PromptTemplate>,
    max_prompt_bytes: Option<usize>,
}

impl PromptBuilder {
    /// Builder with the built-in templates and no size limit.
    pub fn builtin() -> Result<Self> {
        let mut templates = HashMap::with_capacity(Task::ALL.len());
        for task in Task::ALL {
            templates.insert(task, parse_for(task, task.instructions())?);
        }

        Ok(Self {
            templates,
            max_prompt_bytes: None,
        })
    }

    /// Builder honoring `prompt_templates` and `max_prompt_bytes` from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::builtin()?;
        for task in Task::ALL {
            if let Some(text) = config.template_for(task) {
                builder.templates.insert(task, parse_for(task, text)?);
            }
        }
        builder.max_prompt_bytes = config.max_prompt_bytes;
        Ok(builder)
    }

    pub fn with_max_prompt_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_prompt_bytes = limit;
        self
    }

    /// Render the prompt for `task` with `code` embedded whole.
    pub fn render(&self, task: Task, file_name: &str, code: &str) -> Result<String> {
        let template = self.templates.get(&task).ok_or_else(|| {
            SmartcodeError::ConfigError(format!("no prompt template for task '{}'", task))
        })?;

        let vars = HashMap::from([
            ("code", code),
            ("file_name", file_name),
            ("task", task.name()),
        ]);

        template
            .render(&vars)
            .map_err(|e| template_error(task, &e))
    }

    /// Render the prompt for the file at `source_path` and apply the size guard.
    pub fn build(&self, task: Task, source_path: &Path, code: &str) -> Result<String> {
        let file_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        let prompt = self.render(task, &file_name, code)?;

        if let Some(limit) = self.max_prompt_bytes
            && prompt.len() > limit
        {
            return Err(SmartcodeError::PromptTooLarge {
                path: source_path.to_path_buf(),
                size: prompt.len(),
                limit,
            });
        }

        Ok(prompt)
    }
}

/// Render the built-in prompt for `task` around `code`.
pub fn build_prompt(task: Task, code: &str) -> Result<String> {
    PromptBuilder::builtin()?.render(task, "", code)
}

/// Parse a task template and check it only uses known variables.
pub fn parse_for(task: Task, text: &str) -> Result<PromptTemplate> {
    let template = PromptTemplate::parse(text).map_err(|e| template_error(task, &e))?;

    if let Some(unknown) = template
        .variables()
        .find(|name| !TEMPLATE_VARIABLES.contains(name))
    {
        return Err(SmartcodeError::ConfigError(format!(
            "prompt template for '{}' references unknown variable '{}'\n\
             Available variables: {}",
            task,
            unknown,
            TEMPLATE_VARIABLES.join(", ")
        )));
    }

    if !template.variables().any(|name| name == "code") {
        return Err(SmartcodeError::ConfigError(format!(
            "prompt template for '{}' must include {{code}} so the source is sent to the model",
            task
        )));
    }

    Ok(template)
}

fn template_error(task: Task, err: &TemplateError) -> SmartcodeError {
    SmartcodeError::ConfigError(format!("prompt template for '{}': {}", task, err))
}
