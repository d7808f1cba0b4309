//! Prompt construction for model runs.
//!
//! This module provides:
//!
//! - **Source**: loading the file to analyze as UTF-8 text
//! - **Template**: `{variable}` substitution used for prompts and commands
//! - **Builder**: per-task instruction templates rendered around the code
//!
//! # Template Syntax
//!
//! Task templates may reference `{code}`, `{file_name}` and `{task}`:
//!
//! ```text
//! Explain what {file_name} does.
//!
//! {code}
//! ```
//!
//! Use `{{` to escape and render a literal `{`.

mod builder;
mod source;
mod template;

pub use builder::{PromptBuilder, TEMPLATE_VARIABLES, build_prompt, parse_for};
pub use source::read_source;
pub use template::{PromptTemplate, TemplateError, render_template};
