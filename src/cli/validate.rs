//! Check a service description against the function editor's input rules.
//!
//! Every rule is evaluated, so one run reports all problems:
//!
//! - `name` must not be blank
//! - `timeout` must be between 1 and 300 seconds
//! - `memorySize` must be between 128 and 1536 MB, in steps of 64
//! - an unknown `runtime` is reported as a warning; it renders with a blank
//!   build image
//!
//! The command exits with status 1 when any rule fails.
//!
//! # Examples
//!
//! ```bash
//! fnform validate --name orders --runtime python3.6 --memory-size 256
//! fnform validate --spec orders.toml --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::OutputFormat;
use crate::catalog::RuntimeCatalog;
use crate::config::GlobalConfig;
use crate::core::FnformError;
use crate::models::{ServiceArgs, ServiceSpec, ValidationIssue, ValidationReport};

/// Command to validate a service description.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// JSON shape of a validation run.
#[derive(Serialize)]
struct ValidationOutput<'a> {
    valid: bool,
    spec: &'a ServiceSpec,
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    runtime_suggestions: Vec<String>,
}

impl ValidateCommand {
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        let spec = self.service.resolve().await?;
        let catalog = config.catalog();
        let report = spec.validate(&catalog);
        let suggestions = runtime_suggestions(&spec, &catalog);

        match self.format {
            OutputFormat::Json => {
                let output = ValidationOutput {
                    valid: report.is_valid(),
                    spec: &spec,
                    errors: &report.errors,
                    warnings: &report.warnings,
                    runtime_suggestions: suggestions,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => print_report(&report, &suggestions),
        }

        if report.is_valid() {
            Ok(())
        } else {
            Err(FnformError::InvalidServiceSpec {
                issues: report.errors.iter().map(ToString::to_string).collect(),
            }
            .into())
        }
    }
}

fn runtime_suggestions(spec: &ServiceSpec, catalog: &RuntimeCatalog) -> Vec<String> {
    if catalog.contains(&spec.runtime) {
        Vec::new()
    } else {
        catalog.suggestions(&spec.runtime)
    }
}

fn print_report(report: &ValidationReport, suggestions: &[String]) {
    for error in &report.errors {
        println!("{} {}", "✗".red(), error);
    }
    for warning in &report.warnings {
        println!("{} {}", "⚠ Warning:".yellow(), warning);
    }
    if !suggestions.is_empty() {
        println!("  Did you mean {}?", suggestions.join(", ").cyan());
    }
    if report.is_valid() {
        println!("{} Service description is valid", "✓".green());
    }
}
