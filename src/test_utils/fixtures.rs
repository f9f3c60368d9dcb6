//! Test fixtures for service descriptions, templates and configuration files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ServiceSpec;

/// A service description file.
#[derive(Clone, Debug)]
pub struct SpecFixture {
    pub file_name: String,
    pub content: String,
}

impl SpecFixture {
    /// A valid Python service in TOML.
    pub fn python() -> Self {
        Self {
            file_name: "orders.toml".to_string(),
            content: r#"
name = "orders"
runtime = "python3.6"
timeout = 30
memorySize = 256
"#
            .trim_start()
            .to_string(),
        }
    }

    /// A valid Node service in JSON.
    pub fn node_json() -> Self {
        Self {
            file_name: "users.json".to_string(),
            content: r#"{"name": "users", "runtime": "nodejs4.3", "timeout": 10, "memorySize": 512}"#
                .to_string(),
        }
    }

    /// A service whose runtime has no build image.
    pub fn unknown_runtime() -> Self {
        Self {
            file_name: "legacy.toml".to_string(),
            content: "name = \"legacy\"\nruntime = \"java8\"\n".to_string(),
        }
    }

    /// A service that breaks every input rule.
    pub fn invalid() -> Self {
        Self {
            file_name: "invalid.toml".to_string(),
            content: "name = \"\"\ntimeout = 0\nmemorySize = 100\n".to_string(),
        }
    }

    /// The parsed spec.
    pub fn spec(&self) -> Result<ServiceSpec> {
        Ok(ServiceSpec::parse(&self.content, Path::new(&self.file_name))?)
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write spec fixture {}", path.display()))?;
        Ok(path)
    }
}

/// A template file.
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub file_name: String,
    pub content: String,
}

impl TemplateFixture {
    /// A minimal template using every lambda context key.
    pub fn lambda_summary() -> Self {
        Self {
            file_name: "summary.yaml".to_string(),
            content: "name: {{name}}\nruntime: {{runtime}}\ntimeout: {{timeout}}\nmemory: {{memorySize}}\n"
                .to_string(),
        }
    }

    /// A minimal pipeline template with a fallback for unknown runtimes.
    pub fn pipeline_image() -> Self {
        Self {
            file_name: "image.yaml".to_string(),
            content: "project: {{name}}\n{{#buildImage}}\nimage: {{{buildImage}}}\n{{/buildImage}}\nstage: build\n{{^buildImage}}\nimage: none\n{{/buildImage}}\n"
                .to_string(),
        }
    }

    /// A template whose `buildImage` section is never closed.
    pub fn unclosed_section() -> Self {
        Self {
            file_name: "broken.yaml".to_string(),
            content: "name: {{name}}\n{{#buildImage}}\nimage: {{buildImage}}\n".to_string(),
        }
    }

    /// A template whose output is not valid YAML.
    pub fn not_yaml() -> Self {
        Self {
            file_name: "not-yaml.yaml".to_string(),
            content: "name: [{{name}}\n".to_string(),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write template fixture {}", path.display()))?;
        Ok(path)
    }
}

/// A global configuration file.
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
}

impl ConfigFixture {
    /// Strict mode enabled.
    pub fn strict() -> Self {
        Self {
            content: "strict = true\n".to_string(),
        }
    }

    /// Adds a Go runtime and overrides the Node 6.10 build image.
    pub fn custom_runtimes() -> Self {
        Self {
            content: r#"
[[runtimes]]
platform = "go"
platform_label = "Go"
version = "1.x"
build_image = "aws/codebuild/golang:1.10"

[[runtimes]]
platform = "nodejs"
version = "6.10"
build_image = "custom/node:6.10"
"#
            .trim_start()
            .to_string(),
        }
    }

    /// Points the lambda family at a template file.
    pub fn lambda_template(path: &Path) -> Self {
        Self {
            content: format!("[templates]\nlambda = {:?}\n", path.display().to_string()),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("config.toml");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write config fixture {}", path.display()))?;
        Ok(path)
    }
}
