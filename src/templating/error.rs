//! Template error types.
//!
//! Unknown keys never fail: they degrade to empty output. Malformed template
//! syntax is detected when a template is compiled. Rendering fails only when a
//! variable tag names a value that has no text form.

use thiserror::Error;

/// Errors raised while compiling or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template text is not well-formed.
    #[error("Template syntax error: {0}")]
    Syntax(String),

    /// A partial exists but could not be read.
    #[error("Failed to load template partial: {0}")]
    Partial(String),

    #[error("Template render error: {0}")]
    Render(String),
}

impl From<mustache::Error> for TemplateError {
    fn from(error: mustache::Error) -> Self {
        match error {
            mustache::Error::Parser(error) => Self::Syntax(error.to_string()),
            mustache::Error::Io(error) => Self::Partial(error.to_string()),
            other => Self::Render(other.to_string()),
        }
    }
}
