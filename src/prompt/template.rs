//! Template engine for prompt and command placeholders.
//!
//! Templates are parsed once into literal and variable segments, so syntax
//! errors in a user-supplied template surface when the configuration is
//! loaded rather than halfway through a run.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of variable `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Undefined variables are an error, never an empty substitution. Values are
//! inserted verbatim: braces inside a value are not interpreted.

use std::collections::HashMap;
use thiserror::Error;

/// Error type for template parsing and rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    /// An empty variable name was found (e.g., `{}`).
    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable { name: String, position: usize },
}

/// A parsed template, ready to be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse template text into segments.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) => name.push(c),
                            None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                        }
                    }

                    let name = name.trim();
                    if name.is_empty() {
                        return Err(TemplateError::EmptyVariableName { position: pos });
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Variable {
                        name: name.to_string(),
                        position: pos,
                    });
                }
                '}' => {
                    // `}}` collapses to one brace; a lone `}` is kept as-is.
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                    }
                    literal.push('}');
                }
                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Names of all variables referenced by the template, in order of use.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render the template, substituting every variable from `vars`.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        let mut capacity = 0;
        for segment in &self.segments {
            capacity += match segment {
                Segment::Literal(text) => text.len(),
                Segment::Variable { name, .. } => vars.get(name.as_str()).map_or(0, |v| v.len()),
            };
        }

        let mut out = String::with_capacity(capacity);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable { name, position } => match vars.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::UndefinedVariable {
                            name: name.clone(),
                            position: *position,
                        });
                    }
                },
            }
        }

        Ok(out)
    }
}

/// Parse and render a template in one step.
pub fn render_template(template: &str, vars: &HashMap<&str, &str>) -> Result<String, TemplateError> {
    PromptTemplate::parse(template)?.render(vars)
}
