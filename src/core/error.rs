//! Error handling for fnform
//!
//! This module provides the crate-wide error type and user-friendly error
//! reporting for the CLI. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`FnformError`] - Enumerated failure cases
//! - [`ErrorContext`] - Wrapper adding a suggestion and details for display
//! - [`user_friendly_error`] - Converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # What is *not* an error
//!
//! Unknown runtimes and template keys missing from the render context degrade
//! to empty output. They only become errors when strict mode is requested
//! explicitly ([`FnformError::UnknownRuntime`], [`FnformError::InvalidServiceSpec`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use fnform::core::{FnformError, ErrorContext, user_friendly_error};
//!
//! let error = FnformError::UnknownRuntime {
//!     runtime: "nodejs6.1".to_string(),
//!     suggestions: vec!["nodejs6.10".to_string()],
//! };
//!
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // Colored error with a suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::source::FetchError;
use crate::templating::TemplateError;

/// The main error type for fnform operations
///
/// Payloads are plain strings so the type stays [`Clone`], which lets
/// [`user_friendly_error`] rebuild a context from a downcast reference.
#[derive(Error, Debug, Clone)]
pub enum FnformError {
    /// Template text could not be retrieved
    #[error(transparent)]
    TemplateFetch(#[from] FetchError),

    /// Template text is malformed
    #[error("Invalid template '{identifier}': {source}")]
    TemplateSyntax {
        identifier: String,
        #[source]
        source: TemplateError,
    },

    /// A compiled template could not be rendered with its context
    #[error("Failed to render {template} template: {source}")]
    TemplateRender {
        template: String,
        #[source]
        source: TemplateError,
    },

    /// Strict mode: the runtime has no catalog entry
    #[error("Unknown runtime '{runtime}'")]
    UnknownRuntime {
        runtime: String,
        suggestions: Vec<String>,
    },

    /// Strict mode: the service description breaks the editor's input rules
    #[error("Invalid service description: {}", issues.join("; "))]
    InvalidServiceSpec {
        issues: Vec<String>,
    },

    /// A service spec file could not be parsed
    #[error("Invalid service spec file {file}: {reason}")]
    SpecFileParse {
        file: String,
        reason: String,
    },

    /// Configuration file issues
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Rendered output could not be written
    #[error("Failed to write output to {path}: {reason}")]
    OutputWriteFailed {
        path: String,
        reason: String,
    },

    /// `--verify` found that a rendered document is not valid YAML
    #[error("Rendered {template} template is not valid YAML: {reason}")]
    YamlVerificationFailed {
        template: String,
        reason: String,
    },

    /// Anything else
    #[error("{message}")]
    Other {
        message: String,
    },
}

/// Error wrapper with a suggestion and details for display
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: FnformError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: FnformError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error
    ///
    /// Details are shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`FnformError`], [`FetchError`], [`TemplateError`],
/// [`std::io::Error`] and [`toml::de::Error`] anywhere in the chain; anything
/// else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(fnform_error) = cause.downcast_ref::<FnformError>() {
            return create_error_context(fnform_error.clone());
        }
        if let Some(fetch_error) = cause.downcast_ref::<FetchError>() {
            return create_error_context(FnformError::TemplateFetch(fetch_error.clone()));
        }
        if let Some(template_error) = cause.downcast_ref::<TemplateError>() {
            let source = template_error.clone();
            return create_error_context(match source {
                TemplateError::Render(_) => FnformError::TemplateRender {
                    template: "template".to_string(),
                    source,
                },
                _ => FnformError::TemplateSyntax {
                    identifier: "template".to_string(),
                    source,
                },
            });
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(FnformError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the file. Verify quotes, brackets, and key names");
    }

    if let Some(io_error) = error.root_cause().downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(FnformError::Other {
                message: format_chain(&error),
            })
            .with_suggestion("Check that the file or directory exists and the path is correct");
        }
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(FnformError::Other {
                message: format_chain(&error),
            })
            .with_suggestion("Check file ownership and permissions");
        }
    }

    ErrorContext::new(FnformError::Other {
        message: format_chain(&error),
    })
}

/// Error message followed by its numbered causes.
fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`FnformError`] to a context with tailored suggestions
fn create_error_context(error: FnformError) -> ErrorContext {
    let (suggestion, details) = guidance(&error);
    let mut context = ErrorContext::new(error);
    if let Some(suggestion) = suggestion {
        context = context.with_suggestion(suggestion);
    }
    if let Some(details) = details {
        context = context.with_details(details);
    }
    context
}

/// Suggestion and details for an error.
fn guidance(error: &FnformError) -> (Option<String>, Option<&'static str>) {
    const NOT_RETRIED: &str = "Template fetches are not retried automatically";

    match error {
        FnformError::TemplateFetch(FetchError::Status {
            status: 404,
            ..
        }) => (
            Some("Check the template URL, or use a built-in template (builtin:lambda, builtin:pipeline)".into()),
            None,
        ),
        FnformError::TemplateFetch(FetchError::Status {
            ..
        }) => (
            Some("The template server rejected the request; try again or use a local template file".into()),
            Some(NOT_RETRIED),
        ),
        FnformError::TemplateFetch(FetchError::Network {
            ..
        }) => (Some("Check your network connection and the template URL".into()), Some(NOT_RETRIED)),
        FnformError::TemplateFetch(FetchError::Read {
            ..
        }) => (Some("Check that the template file exists and is readable".into()), None),
        FnformError::TemplateSyntax {
            ..
        } => (
            Some("Check that every {{#section}} and {{^section}} has a matching {{/section}} and every tag is closed".into()),
            Some("Missing values never cause errors; only malformed template text does"),
        ),
        FnformError::TemplateRender {
            ..
        } => (
            Some("Use {{#name}}...{{/name}} to iterate a list or open an object instead of {{name}}".into()),
            None,
        ),
        FnformError::UnknownRuntime {
            suggestions,
            ..
        } => {
            let suggestion = if suggestions.is_empty() {
                "Run 'fnform runtimes' to list the available runtimes".to_string()
            } else {
                format!("Did you mean {}?", suggestions.join(", "))
            };
            (Some(suggestion), Some("Strict mode is enabled; without it the build image is left blank"))
        }
        FnformError::InvalidServiceSpec {
            ..
        } => (Some("Fix the listed fields or run 'fnform validate' for a full report".into()), None),
        FnformError::SpecFileParse {
            ..
        } => (
            Some("Spec files use the keys name, runtime, timeout and memorySize (TOML, or JSON with a .json extension)".into()),
            None,
        ),
        FnformError::ConfigError {
            ..
        } => (Some("Check the config file passed with --config or set in FNFORM_CONFIG".into()), None),
        FnformError::OutputWriteFailed {
            ..
        } => (Some("Check that the output directory exists and is writable".into()), None),
        FnformError::YamlVerificationFailed {
            ..
        } => (
            Some("Check the template for values that need quoting".into()),
            Some("The document was rendered but not written"),
        ),
        FnformError::Other {
            ..
        } => (None, None),
    }
}
