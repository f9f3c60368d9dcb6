//! List the runtimes a service can use and their build images.
//!
//! Runtimes are grouped by platform, the way the function editor presents
//! them. Entries from the `[[runtimes]]` table of the global configuration are
//! included.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::OutputFormat;
use crate::catalog::PlatformGroup;
use crate::config::GlobalConfig;

/// Command to list the runtime catalog.
#[derive(Args, Debug)]
pub struct RuntimesCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl RuntimesCommand {
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        let catalog = config.catalog();
        let platforms = catalog.platforms();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&platforms)?),
            OutputFormat::Text => print_tree(&platforms),
        }
        Ok(())
    }
}

fn print_tree(platforms: &[PlatformGroup<'_>]) {
    for group in platforms {
        println!("{} ({})", group.label.bold(), group.platform);
        for runtime in &group.runtimes {
            println!(
                "  {} {} {}",
                format!("{:<14}", runtime.identifier()).green(),
                format!("{:<8}", runtime.version_label),
                runtime.build_image.dimmed()
            );
        }
    }
}
