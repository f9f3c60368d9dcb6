//! Runtime catalog: composite runtime identifiers and their build images.
//!
//! A runtime identifier is a platform name followed directly by a version
//! (`nodejs` + `6.10` = `nodejs6.10`). Each catalog entry maps one identifier
//! to the CodeBuild image used to build functions on that runtime.
//!
//! The built-in entries are plain data. Configuration can add entries or
//! replace the image of an existing identifier through
//! [`RuntimeCatalog::extend`], without touching rendering code.
//!
//! Lookups are exact: no normalization and no fuzzy matching. An unknown
//! identifier yields `None`, which the pipeline template renders as an empty
//! build image. Suggestions for near misses are only computed on request
//! (see [`RuntimeCatalog::suggestions`]), for strict mode and validation output.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use crate::constants::SIMILARITY_THRESHOLD_PERCENT;
use crate::core::FnformError;

struct BuiltinRuntime {
    platform: &'static str,
    platform_label: &'static str,
    version: &'static str,
    version_label: &'static str,
    build_image: &'static str,
}

const BUILTIN_RUNTIMES: &[BuiltinRuntime] = &[
    BuiltinRuntime {
        platform: "nodejs",
        platform_label: "Node",
        version: "6.10",
        version_label: "v6.10",
        build_image: "aws/codebuild/eb-nodejs-6.10.0-amazonlinux-64:4.0.0",
    },
    BuiltinRuntime {
        platform: "nodejs",
        platform_label: "Node",
        version: "4.3",
        version_label: "v4.3",
        build_image: "aws/codebuild/eb-nodejs-4.4.6-amazonlinux-64:2.1.3",
    },
    BuiltinRuntime {
        platform: "python",
        platform_label: "Python",
        version: "2.7",
        version_label: "v2.7",
        build_image: "aws/codebuild/eb-python-2.7-amazonlinux-64:2.3.2",
    },
    BuiltinRuntime {
        platform: "python",
        platform_label: "Python",
        version: "3.6",
        version_label: "v3.6",
        build_image: "aws/codebuild/eb-python-3.6-amazonlinux-64:2.3.2",
    },
];

static BUILTIN_CATALOG: LazyLock<RuntimeCatalog> = LazyLock::new(|| RuntimeCatalog {
    entries: BUILTIN_RUNTIMES
        .iter()
        .map(|runtime| RuntimeEntry {
            platform: runtime.platform.to_string(),
            platform_label: runtime.platform_label.to_string(),
            version: runtime.version.to_string(),
            version_label: runtime.version_label.to_string(),
            build_image: runtime.build_image.to_string(),
        })
        .collect(),
});

/// Look up the build image for a runtime in the built-in catalog.
///
/// # Examples
///
/// ```rust
/// use fnform::catalog::resolve_build_image;
///
/// assert_eq!(
///     resolve_build_image("nodejs6.10"),
///     Some("aws/codebuild/eb-nodejs-6.10.0-amazonlinux-64:4.0.0")
/// );
/// assert_eq!(resolve_build_image("ruby2.5"), None);
/// ```
#[must_use]
pub fn resolve_build_image(runtime: &str) -> Option<&'static str> {
    BUILTIN_CATALOG.build_image(runtime)
}

/// One selectable runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEntry {
    /// Platform name, e.g. `nodejs`
    pub platform: String,
    /// Display label for the platform, e.g. `Node`
    pub platform_label: String,
    /// Platform version, e.g. `6.10`
    pub version: String,
    /// Display label for the version, e.g. `v6.10`
    pub version_label: String,
    /// CodeBuild image used to build functions on this runtime
    pub build_image: String,
}

impl RuntimeEntry {
    /// Composite identifier: platform immediately followed by version.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}{}", self.platform, self.version)
    }

    fn matches(&self, runtime: &str) -> bool {
        runtime.strip_prefix(self.platform.as_str()) == Some(self.version.as_str())
    }
}

/// Runtimes of one platform, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformGroup<'a> {
    pub platform: &'a str,
    pub label: &'a str,
    pub runtimes: Vec<&'a RuntimeEntry>,
}

/// Ordered table of runtimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeCatalog {
    entries: Vec<RuntimeEntry>,
}

impl Default for RuntimeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuntimeCatalog {
    /// The built-in runtimes.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    /// A catalog with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add entries, replacing any existing entry with the same identifier in place.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = RuntimeEntry>) {
        for entry in entries {
            let identifier = entry.identifier();
            match self.entries.iter_mut().find(|existing| existing.identifier() == identifier) {
                Some(existing) => {
                    tracing::debug!("Overriding runtime '{}' with image {}", identifier, entry.build_image);
                    *existing = entry;
                }
                None => self.entries.push(entry),
            }
        }
    }

    /// Find the entry for a composite runtime identifier.
    #[must_use]
    pub fn get(&self, runtime: &str) -> Option<&RuntimeEntry> {
        self.entries.iter().find(|entry| entry.matches(runtime))
    }

    #[must_use]
    pub fn contains(&self, runtime: &str) -> bool {
        self.get(runtime).is_some()
    }

    /// Build image for a runtime, `None` when the runtime is unknown.
    #[must_use]
    pub fn build_image(&self, runtime: &str) -> Option<&str> {
        self.get(runtime).map(|entry| entry.build_image.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[RuntimeEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by platform, preserving first-seen order.
    ///
    /// This is the two-level platform → version tree a runtime picker shows.
    #[must_use]
    pub fn platforms(&self) -> Vec<PlatformGroup<'_>> {
        let mut groups: Vec<PlatformGroup<'_>> = Vec::new();
        for entry in &self.entries {
            match groups.iter_mut().find(|group| group.platform == entry.platform) {
                Some(group) => group.runtimes.push(entry),
                None => groups.push(PlatformGroup {
                    platform: &entry.platform,
                    label: &entry.platform_label,
                    runtimes: vec![entry],
                }),
            }
        }
        groups
    }

    /// Known identifiers close to `runtime`, nearest first.
    #[must_use]
    pub fn suggestions(&self, runtime: &str) -> Vec<String> {
        let threshold = (runtime.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
        let mut scored: Vec<(usize, String)> = self
            .entries
            .iter()
            .map(RuntimeEntry::identifier)
            .map(|identifier| (levenshtein(runtime, &identifier), identifier))
            .filter(|(distance, _)| *distance <= threshold)
            .collect();
        scored.sort();
        scored.into_iter().map(|(_, identifier)| identifier).collect()
    }

    /// Look up a runtime, failing when it is unknown.
    ///
    /// Only strict mode uses this; the default lookup path is
    /// [`build_image`](Self::build_image), which never fails.
    pub fn require(&self, runtime: &str) -> Result<&RuntimeEntry, FnformError> {
        self.get(runtime).ok_or_else(|| FnformError::UnknownRuntime {
            runtime: runtime.to_string(),
            suggestions: self.suggestions(runtime),
        })
    }
}
