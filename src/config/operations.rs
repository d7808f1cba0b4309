//! Config loading, validation, and lookup operations.

use super::model::Config;
use crate::error::{Result, SmartcodeError};
use crate::prompt::{PromptTemplate, parse_for};
use crate::task::Task;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SmartcodeError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            SmartcodeError::ConfigError(format!("{} (in '{}')", e, path.display()))
        })
    }

    /// Load the file at `path` if one was given, otherwise use defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            SmartcodeError::ConfigError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SmartcodeError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `default_model` must not be blank
    /// - `command` must split into at least one word and may only reference `{model}`
    /// - `max_prompt_bytes`, when set, must be positive
    /// - `prompt_templates` keys must name a task and each template must parse
    pub fn validate(&self) -> Result<()> {
        if self.default_model.trim().is_empty() {
            return Err(SmartcodeError::ConfigError(
                "config validation failed: default_model must not be empty".to_string(),
            ));
        }

        self.validate_command()?;

        if self.max_prompt_bytes == Some(0) {
            return Err(SmartcodeError::ConfigError(
                "config validation failed: max_prompt_bytes must be greater than 0".to_string(),
            ));
        }

        for (name, text) in &self.prompt_templates {
            let task: Task = name.parse().map_err(|e| {
                SmartcodeError::ConfigError(format!(
                    "config validation failed: prompt_templates: {}",
                    e
                ))
            })?;
            parse_for(task, text)?;
        }

        Ok(())
    }

    fn validate_command(&self) -> Result<()> {
        let words = shell_words::split(&self.command).map_err(|e| {
            SmartcodeError::ConfigError(format!(
                "config validation failed: cannot parse command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.command, e
            ))
        })?;

        if words.is_empty() {
            return Err(SmartcodeError::ConfigError(
                "config validation failed: command must not be empty".to_string(),
            ));
        }

        for word in &words {
            let template = PromptTemplate::parse(word).map_err(|e| {
                SmartcodeError::ConfigError(format!(
                    "config validation failed: command '{}': {}",
                    self.command, e
                ))
            })?;
            if let Some(unknown) = template.variables().find(|name| *name != "model") {
                return Err(SmartcodeError::ConfigError(format!(
                    "config validation failed: command '{}' references unknown variable '{}' \
                     (only {{model}} is available)",
                    self.command, unknown
                )));
            }
        }

        Ok(())
    }

    /// The configured template override for `task`, if any.
    ///
    /// The test task may be keyed as either `test` or `generate-tests`.
    pub fn template_for(&self, task: Task) -> Option<&str> {
        self.prompt_templates
            .get(task.name())
            .or_else(|| match task {
                Task::GenerateTests => self.prompt_templates.get("generate-tests"),
                _ => None,
            })
            .map(String::as_str)
    }
}
