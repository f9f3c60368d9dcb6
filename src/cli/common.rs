//! Helpers shared by the fnform commands.

use clap::ValueEnum;
use tracing::warn;

use crate::catalog::RuntimeCatalog;
use crate::core::FnformError;
use crate::models::{ServiceSpec, ValidationReport};

/// Output format for commands that print structured results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Apply the editor's input rules before rendering.
///
/// In lenient mode every problem is logged as a warning and rendering goes
/// ahead. In strict mode an invalid spec is [`FnformError::InvalidServiceSpec`]
/// and an unknown runtime is [`FnformError::UnknownRuntime`].
pub fn check_spec(
    spec: &ServiceSpec,
    catalog: &RuntimeCatalog,
    strict: bool,
) -> Result<ValidationReport, FnformError> {
    let report = spec.validate(catalog);

    if strict {
        if !report.is_valid() {
            return Err(FnformError::InvalidServiceSpec {
                issues: report.errors.iter().map(ToString::to_string).collect(),
            });
        }
        catalog.require(&spec.runtime)?;
    } else {
        for issue in report.errors.iter().chain(&report.warnings) {
            warn!("{}", issue);
        }
    }

    Ok(report)
}
