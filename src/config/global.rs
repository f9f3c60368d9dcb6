//! Global configuration for fnform.
//!
//! The user-wide configuration lives in `~/.fnform/config.toml`
//! (`%LOCALAPPDATA%\fnform\config.toml` on Windows). The `--config` flag or
//! the `FNFORM_CONFIG` environment variable point elsewhere. A missing file is
//! not an error: every setting has a default.
//!
//! # Example
//!
//! ```toml
//! strict = false
//! fetch_timeout_secs = 10
//!
//! [templates]
//! lambda = "https://example.com/templates/lambda.yaml"
//! pipeline = "./templates/pipeline.yaml"
//!
//! [[runtimes]]
//! platform = "go"
//! platform_label = "Go"
//! version = "1.x"
//! build_image = "aws/codebuild/golang:1.10"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use fnform::config::GlobalConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GlobalConfig::load().await?;
//! let catalog = config.catalog();
//! println!("{} runtimes available", catalog.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::catalog::{RuntimeCatalog, RuntimeEntry};
use crate::constants::{CONFIG_ENV_VAR, DEFAULT_FETCH_TIMEOUT};
use crate::core::FnformError;
use crate::source::TemplateLocation;
use crate::templating::TemplateFamily;

const fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

fn is_default_fetch_timeout_secs(secs: &u64) -> bool {
    *secs == default_fetch_timeout_secs()
}

/// Global configuration structure for fnform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Fail on unknown runtimes and invalid service descriptions instead of
    /// rendering blanks.
    #[serde(default)]
    pub strict: bool,

    /// Request timeout for templates fetched over HTTP, in seconds.
    ///
    /// Default: 30
    #[serde(
        default = "default_fetch_timeout_secs",
        skip_serializing_if = "is_default_fetch_timeout_secs"
    )]
    pub fetch_timeout_secs: u64,

    /// Template location overrides per family.
    #[serde(default)]
    pub templates: TemplateSources,

    /// Runtimes added to, or overriding entries of, the built-in catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runtimes: Vec<RuntimeConfig>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            strict: false,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            templates: TemplateSources::default(),
            runtimes: Vec::new(),
        }
    }
}

/// The `[templates]` table: template identifiers per family.
///
/// Identifiers use the [`TemplateLocation`] syntax (`builtin:lambda`, a path,
/// or an HTTP(S) URL). Unset families use their built-in template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
}

impl TemplateSources {
    #[must_use]
    pub fn get(&self, family: TemplateFamily) -> Option<&str> {
        match family {
            TemplateFamily::Lambda => self.lambda.as_deref(),
            TemplateFamily::Pipeline => self.pipeline.as_deref(),
        }
    }
}

/// A `[[runtimes]]` entry.
///
/// Labels are optional: the platform label defaults to the platform name and
/// the version label to the version prefixed with `v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub platform: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
    pub build_image: String,
}

impl From<RuntimeConfig> for RuntimeEntry {
    fn from(config: RuntimeConfig) -> Self {
        let platform_label = config.platform_label.unwrap_or_else(|| config.platform.clone());
        let version_label = config.version_label.unwrap_or_else(|| format!("v{}", config.version));
        Self {
            platform: config.platform,
            platform_label,
            version: config.version,
            version_label,
            build_image: config.build_image,
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from the default location.
    ///
    /// Returns the default configuration when the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load global configuration from an optional path.
    ///
    /// Without a path, the `FNFORM_CONFIG` environment variable is consulted,
    /// then the default location. A path that doesn't exist yields the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load global configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// doesn't match the expected schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Path of the global configuration file.
    ///
    /// - `FNFORM_CONFIG`, when set and non-empty
    /// - **Windows**: `%LOCALAPPDATA%\fnform\config.toml`
    /// - **Unix/macOS**: `~/.fnform/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("fnform")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".fnform")
        };

        Ok(config_dir.join("config.toml"))
    }

    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// The built-in catalog extended with the configured runtimes.
    #[must_use]
    pub fn catalog(&self) -> RuntimeCatalog {
        let mut catalog = RuntimeCatalog::builtin();
        catalog.extend(self.runtimes.iter().cloned().map(RuntimeEntry::from));
        catalog
    }

    /// Where `family`'s template is read from: the configured location or the built-in.
    ///
    /// # Errors
    ///
    /// Returns [`FnformError::ConfigError`] when the configured identifier is malformed.
    pub fn template_location(&self, family: TemplateFamily) -> Result<TemplateLocation, FnformError> {
        match self.templates.get(family) {
            Some(identifier) => identifier.parse().map_err(|message| FnformError::ConfigError {
                message: format!("templates.{family}: {message}"),
            }),
            None => Ok(TemplateLocation::builtin(family)),
        }
    }
}
