//! Render contexts and the functions that build them.
//!
//! A [`RenderContext`] is the flat key/value set a template is rendered
//! against. Each [`TemplateFamily`] has its own context shape:
//!
//! - **lambda**: `name`, `runtime`, `timeout`, `memorySize`, passed through
//!   from the [`ServiceSpec`] unchanged
//! - **pipeline**: `name` and `buildImage`, the latter derived from the runtime
//!   through the [`RuntimeCatalog`]; it is `null` when the runtime is unknown
//!
//! Building a context never fails and never validates its input.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{self, RuntimeCatalog};
use crate::models::ServiceSpec;

/// Flat key/value set fed to the renderer.
///
/// # Examples
///
/// ```rust
/// use fnform::templating::RenderContext;
///
/// let context = RenderContext::new().with("name", "svc1").with("timeout", 3);
/// assert_eq!(context.get("timeout"), Some(&serde_json::json!(3)));
/// assert!(context.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: Map<String, Value>,
}

impl RenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The context as a JSON object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

impl From<Map<String, Value>> for RenderContext {
    fn from(values: Map<String, Value>) -> Self {
        Self {
            values,
        }
    }
}

/// The two template families the editor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFamily {
    /// AWS Lambda (SAM) template
    Lambda,
    /// CodePipeline/CodeBuild template
    Pipeline,
}

impl TemplateFamily {
    /// All families, in display order.
    pub const ALL: [Self; 2] = [Self::Lambda, Self::Pipeline];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lambda => "lambda",
            Self::Pipeline => "pipeline",
        }
    }

    /// Build the context this family's template is rendered with.
    #[must_use]
    pub fn context_for(self, spec: &ServiceSpec, catalog: &RuntimeCatalog) -> RenderContext {
        match self {
            Self::Lambda => build_lambda_context(spec),
            Self::Pipeline => build_pipeline_context_with(catalog, &spec.name, &spec.runtime),
        }
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lambda" => Ok(Self::Lambda),
            "pipeline" => Ok(Self::Pipeline),
            other => Err(format!("unknown template family '{other}' (expected lambda or pipeline)")),
        }
    }
}

/// Context for the pipeline template, using the built-in catalog.
///
/// # Examples
///
/// ```rust
/// use fnform::templating::build_pipeline_context;
///
/// let context = build_pipeline_context("svc", "python3.6");
/// assert_eq!(
///     context.get("buildImage").and_then(|v| v.as_str()),
///     Some("aws/codebuild/eb-python-3.6-amazonlinux-64:2.3.2")
/// );
///
/// let context = build_pipeline_context("svc", "ruby2.5");
/// assert!(context.get("buildImage").unwrap().is_null());
/// ```
#[must_use]
pub fn build_pipeline_context(name: &str, runtime: &str) -> RenderContext {
    pipeline_context(name, catalog::resolve_build_image(runtime))
}

/// Context for the pipeline template, using the given catalog.
#[must_use]
pub fn build_pipeline_context_with(
    catalog: &RuntimeCatalog,
    name: &str,
    runtime: &str,
) -> RenderContext {
    pipeline_context(name, catalog.build_image(runtime))
}

fn pipeline_context(name: &str, build_image: Option<&str>) -> RenderContext {
    if build_image.is_none() {
        tracing::debug!("No build image for runtime; buildImage renders empty");
    }
    RenderContext::new().with("name", name).with("buildImage", build_image)
}

/// Context for the lambda template: the spec fields, unchanged.
#[must_use]
pub fn build_lambda_context(spec: &ServiceSpec) -> RenderContext {
    RenderContext::new()
        .with("name", spec.name.as_str())
        .with("runtime", spec.runtime.as_str())
        .with("timeout", spec.timeout)
        .with("memorySize", spec.memory_size)
}
