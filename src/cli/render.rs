//! Render the Lambda and CodePipeline templates for a service.
//!
//! # Examples
//!
//! ```bash
//! # Print the Lambda template for a Python function
//! fnform render lambda --name orders --runtime python3.6
//!
//! # Render both templates from a spec file into a directory
//! fnform render all --spec orders.toml --output deploy/
//!
//! # Use a custom pipeline template and check the result parses as YAML
//! fnform render pipeline --name orders --template ./pipeline.yaml --verify
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use futures::future::try_join_all;
use tracing::{debug, info};

use super::common::check_spec;
use crate::catalog::RuntimeCatalog;
use crate::config::GlobalConfig;
use crate::constants::RENDER_PREVIEW_CHARS;
use crate::core::FnformError;
use crate::models::{ServiceArgs, ServiceSpec};
use crate::source::{TemplateFetcher, TemplateLocation, TemplateStore};
use crate::templating::TemplateFamily;

/// Which templates to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderTarget {
    /// The AWS Lambda (SAM) template
    Lambda,
    /// The CodePipeline/CodeBuild template
    Pipeline,
    /// Both templates
    All,
}

impl RenderTarget {
    #[must_use]
    pub fn families(self) -> Vec<TemplateFamily> {
        match self {
            Self::Lambda => vec![TemplateFamily::Lambda],
            Self::Pipeline => vec![TemplateFamily::Pipeline],
            Self::All => TemplateFamily::ALL.to_vec(),
        }
    }
}

/// Command to render templates for a service description.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template to render
    #[arg(value_enum)]
    pub target: RenderTarget,

    #[command(flatten)]
    pub service: ServiceArgs,

    /// Read the template from this location instead (`builtin:<family>`, a
    /// file path or an HTTP(S) URL); only valid for a single template
    #[arg(long, value_name = "ID")]
    pub template: Option<TemplateLocation>,

    /// Write to this file instead of stdout; with `all`, a directory that
    /// receives `lambda.yaml` and `pipeline.yaml`
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Check that the rendered output parses as YAML
    #[arg(long)]
    pub verify: bool,

    /// Fail on an unknown runtime or an invalid service description
    #[arg(long)]
    pub strict: bool,
}

/// A rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub family: TemplateFamily,
    pub text: String,
}

impl RenderCommand {
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        if self.template.is_some() && self.target == RenderTarget::All {
            bail!("--template can only be used when rendering a single template (lambda or pipeline)");
        }

        let spec = self.service.resolve().await?;
        let catalog = config.catalog();
        check_spec(&spec, &catalog, self.strict || config.strict)?;

        let store = self.build_store(config)?;
        let documents = render_documents(&store, &self.target.families(), &spec, &catalog).await?;

        if self.verify {
            for document in &documents {
                verify_yaml(document)?;
            }
        }

        match &self.output {
            Some(path) if self.target == RenderTarget::All => write_directory(path, &documents).await,
            Some(path) => {
                for document in &documents {
                    write_document(path, document).await?;
                }
                Ok(())
            }
            None => {
                print_documents(&documents);
                Ok(())
            }
        }
    }

    fn build_store(&self, config: &GlobalConfig) -> Result<TemplateStore> {
        let fetcher = TemplateFetcher::new(config.fetch_timeout())?;
        let mut store = TemplateStore::new(fetcher);
        for family in self.target.families() {
            let location = match &self.template {
                Some(location) => location.clone(),
                None => config.template_location(family)?,
            };
            debug!("Using {} template from {}", family, location);
            store = store.with_location(family, location);
        }
        Ok(store)
    }
}

/// Fetch, compile and render each family's template.
///
/// Templates are fetched concurrently; nothing is returned unless every
/// fetch succeeds.
pub async fn render_documents(
    store: &TemplateStore,
    families: &[TemplateFamily],
    spec: &ServiceSpec,
    catalog: &RuntimeCatalog,
) -> Result<Vec<RenderedDocument>, FnformError> {
    let templates = try_join_all(families.iter().map(|family| store.get(*family))).await?;

    families
        .iter()
        .zip(templates)
        .map(|(family, template)| -> Result<RenderedDocument, FnformError> {
            let context = family.context_for(spec, catalog);
            let text = template.render(&context).map_err(|source| FnformError::TemplateRender {
                template: family.to_string(),
                source,
            })?;
            debug!(
                "Rendered {} template: {}",
                family,
                text.chars().take(RENDER_PREVIEW_CHARS).collect::<String>()
            );
            Ok(RenderedDocument {
                family: *family,
                text,
            })
        })
        .collect()
}

fn verify_yaml(document: &RenderedDocument) -> Result<(), FnformError> {
    serde_yaml::from_str::<serde_yaml::Value>(&document.text).map_err(|e| {
        FnformError::YamlVerificationFailed {
            template: document.family.to_string(),
            reason: e.to_string(),
        }
    })?;
    debug!("{} template parses as YAML", document.family);
    Ok(())
}

fn print_documents(documents: &[RenderedDocument]) {
    for (index, document) in documents.iter().enumerate() {
        if index > 0 {
            println!("---");
        }
        print!("{}", document.text);
        if !document.text.ends_with('\n') {
            println!();
        }
    }
}

async fn write_directory(dir: &Path, documents: &[RenderedDocument]) -> Result<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| FnformError::OutputWriteFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    for document in documents {
        write_document(&dir.join(format!("{}.yaml", document.family)), document).await?;
    }
    Ok(())
}

async fn write_document(path: &Path, document: &RenderedDocument) -> Result<()> {
    let write_failed = |e: std::io::Error| FnformError::OutputWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }
    tokio::fs::write(path, &document.text).await.map_err(write_failed)?;
    info!("Wrote {} template to {}", document.family, path.display());
    Ok(())
}
