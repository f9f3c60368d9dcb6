//! Input rules of the function editor.
//!
//! The rendering core accepts any [`ServiceSpec`]; these rules belong to the
//! collector in front of it. Every rule is checked independently so a report
//! lists all problems at once. An unknown runtime is only a warning: the
//! pipeline template still renders, with an empty build image.

use serde::Serialize;

use super::ServiceSpec;
use crate::catalog::RuntimeCatalog;
use crate::constants::{
    MAX_MEMORY_SIZE_MB, MAX_TIMEOUT_SECS, MEMORY_SIZE_STEP_MB, MIN_MEMORY_SIZE_MB,
    MIN_TIMEOUT_SECS,
};

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field the issue refers to, using the template key (`memorySize`)
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a [`ServiceSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Rule violations; any entry makes the spec invalid
    pub errors: Vec<ValidationIssue>,
    /// Conditions that render but are probably unintended
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ServiceSpec {
    /// Check the spec against the editor's input rules.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnform::catalog::RuntimeCatalog;
    /// use fnform::models::ServiceSpec;
    ///
    /// let report = ServiceSpec::new("").with_timeout(0).validate(&RuntimeCatalog::builtin());
    /// assert_eq!(report.errors.len(), 2);
    /// ```
    #[must_use]
    pub fn validate(&self, catalog: &RuntimeCatalog) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.name.trim().is_empty() {
            report.errors.push(ValidationIssue::new("name", "Provide a name for the service"));
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout) {
            report.errors.push(ValidationIssue::new(
                "timeout",
                format!(
                    "Provide a timeout between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds (got {})",
                    self.timeout
                ),
            ));
        }

        let memory_in_range = (MIN_MEMORY_SIZE_MB..=MAX_MEMORY_SIZE_MB).contains(&self.memory_size);
        if !memory_in_range || (self.memory_size - MIN_MEMORY_SIZE_MB) % MEMORY_SIZE_STEP_MB != 0 {
            report.errors.push(ValidationIssue::new(
                "memorySize",
                format!(
                    "Provide memory size between {MIN_MEMORY_SIZE_MB} and {MAX_MEMORY_SIZE_MB} MB in steps of {MEMORY_SIZE_STEP_MB} (got {})",
                    self.memory_size
                ),
            ));
        }

        if !catalog.contains(&self.runtime) {
            report.warnings.push(ValidationIssue::new(
                "runtime",
                format!(
                    "Runtime '{}' has no build image; the pipeline template will leave it blank",
                    self.runtime
                ),
            ));
        }

        report
    }
}
