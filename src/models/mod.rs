//! Shared data models for fnform operations
//!
//! This module provides the service description the renderer consumes, the
//! editor's validation rules, and the command-line arguments shared by every
//! command that collects a service description.

mod service;
mod validation;

pub use service::ServiceSpec;
pub use validation::{ValidationIssue, ValidationReport};

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Service description arguments shared across commands
///
/// Values are layered: defaults, then the `--spec` file if given, then the
/// individual flags.
#[derive(Debug, Clone, Default, Args)]
pub struct ServiceArgs {
    /// Read the service description from a TOML or JSON file
    ///
    /// The file uses the template keys: `name`, `runtime`, `timeout` and
    /// `memorySize`. Files ending in `.json` are parsed as JSON, anything else
    /// as TOML.
    #[arg(long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// Function name
    #[arg(long)]
    pub name: Option<String>,

    /// Runtime identifier: platform followed by version (e.g. `nodejs6.10`, `python3.6`)
    #[arg(long)]
    pub runtime: Option<String>,

    /// Function timeout in seconds
    #[arg(long)]
    pub timeout: Option<u32>,

    /// Function memory size in MB
    #[arg(long)]
    pub memory_size: Option<u32>,
}

impl ServiceArgs {
    /// Overlay the flags onto an existing spec.
    #[must_use]
    pub fn apply(&self, mut spec: ServiceSpec) -> ServiceSpec {
        if let Some(name) = &self.name {
            spec.name.clone_from(name);
        }
        if let Some(runtime) = &self.runtime {
            spec.runtime.clone_from(runtime);
        }
        if let Some(timeout) = self.timeout {
            spec.timeout = timeout;
        }
        if let Some(memory_size) = self.memory_size {
            spec.memory_size = memory_size;
        }
        spec
    }

    /// Build the effective spec from defaults, the spec file and the flags.
    pub async fn resolve(&self) -> Result<ServiceSpec> {
        let base = match &self.spec {
            Some(path) => ServiceSpec::load(path).await?,
            None => ServiceSpec::default(),
        };
        Ok(self.apply(base))
    }
}
