//! The user-supplied description of a serverless function.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{DEFAULT_MEMORY_SIZE_MB, DEFAULT_RUNTIME, DEFAULT_TIMEOUT_SECS};
use crate::core::FnformError;

/// A serverless function deployment as entered by the user.
///
/// Field names serialize in camelCase (`memorySize`) because they double as
/// the keys templates reference. The core never validates a `ServiceSpec`:
/// any combination of values renders. Use [`ServiceSpec::validate`] to apply
/// the editor's input rules before rendering.
///
/// # Examples
///
/// ```rust
/// use fnform::models::ServiceSpec;
///
/// let spec = ServiceSpec::new("orders")
///     .with_runtime("python3.6")
///     .with_timeout(30)
///     .with_memory_size(256);
///
/// assert_eq!(spec.runtime, "python3.6");
/// assert_eq!(ServiceSpec::default().timeout, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Function name
    #[serde(default)]
    pub name: String,

    /// Composite runtime identifier: platform followed by version, e.g. `nodejs6.10`
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u32,

    /// Memory size in MB
    #[serde(default = "default_memory_size")]
    pub memory_size: u32,
}

fn default_runtime() -> String {
    DEFAULT_RUNTIME.to_string()
}

const fn default_timeout() -> u32 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_memory_size() -> u32 {
    DEFAULT_MEMORY_SIZE_MB
}

impl Default for ServiceSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            runtime: default_runtime(),
            timeout: default_timeout(),
            memory_size: default_memory_size(),
        }
    }
}

impl ServiceSpec {
    /// Create a spec with the given name and default runtime, timeout and memory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_memory_size(mut self, memory_size: u32) -> Self {
        self.memory_size = memory_size;
        self
    }

    /// Parse a spec from file content.
    ///
    /// JSON is used when `path` ends in `.json`, TOML otherwise. Missing
    /// fields take their defaults.
    pub fn parse(content: &str, path: &Path) -> Result<Self, FnformError> {
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            toml::from_str(content).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| FnformError::SpecFileParse {
            file: path.display().to_string(),
            reason,
        })
    }

    /// Load a spec from a TOML or JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read service spec from {}", path.display()))?;
        let spec = Self::parse(&content, path)?;
        tracing::debug!("Loaded service spec '{}' from {}", spec.name, path.display());
        Ok(spec)
    }
}
