//! Command-line interface for fnform.
//!
//! # Commands
//!
//! - `render` - Render the Lambda and/or CodePipeline template for a service
//! - `context` - Print the render context of a template family as JSON
//! - `runtimes` - List the runtime catalog with build images
//! - `validate` - Check a service description against the input rules
//!
//! # Global Options
//!
//! - `-v, --verbose` - Debug logging on stderr
//! - `-q, --quiet` - Only log errors
//! - `-c, --config <PATH>` - Global configuration file (default `~/.fnform/config.toml`)
//!
//! `RUST_LOG` takes precedence over `--verbose` and `--quiet`.
//!
//! # Examples
//!
//! ```bash
//! fnform render all --name orders --runtime python3.6 --memory-size 256
//! fnform context pipeline --spec orders.toml
//! fnform runtimes --format json
//! fnform validate --spec orders.toml
//! ```

pub mod common;
mod context;
mod render;
mod runtimes;
mod validate;


pub use common::OutputFormat;
pub use render::{RenderTarget, RenderedDocument, render_documents};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter (`debug`, `warn` or `error`); `RUST_LOG` overrides it
    pub log_level: Option<String>,

    /// Global configuration file given with `--config`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stderr log subscriber.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let level = self.log_level.as_deref().unwrap_or("warn");
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the global configuration this invocation uses.
    pub async fn load_global(&self) -> Result<GlobalConfig> {
        GlobalConfig::load_with_optional(self.config_path.clone()).await
    }
}

#[derive(Parser)]
#[command(
    name = "fnform",
    about = "Render AWS Lambda and CodePipeline templates for a serverless function",
    version,
    author,
    long_about = "fnform turns a serverless function description (name, runtime, timeout, memory size) \
                  into a SAM Lambda template and a CodePipeline/CodeBuild template."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the global configuration file
    #[arg(short, long, global = true, env = "FNFORM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render templates for a service
    Render(render::RenderCommand),

    /// Print the render context of a template family
    Context(context::ContextCommand),

    /// List available runtimes and their build images
    Runtimes(runtimes::RuntimesCommand),

    /// Validate a service description
    Validate(validate::ValidateCommand),
}

impl Cli {
    /// Execute the command with settings derived from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Execute the command with explicit settings.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let global = config.load_global().await?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&global).await,
            Commands::Context(cmd) => cmd.execute(&global).await,
            Commands::Runtimes(cmd) => cmd.execute(&global).await,
            Commands::Validate(cmd) => cmd.execute(&global).await,
        }
    }
}
