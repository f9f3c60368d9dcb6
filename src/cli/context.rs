//! Print the render context a template would receive.
//!
//! Useful when writing a custom template: the keys printed here are exactly
//! the names the template can reference.
//!
//! ```bash
//! fnform context pipeline --name orders --runtime nodejs4.3
//! ```

use anyhow::Result;
use clap::Args;

use crate::config::GlobalConfig;
use crate::models::ServiceArgs;
use crate::templating::TemplateFamily;

/// Command to show a template family's render context.
#[derive(Args, Debug)]
pub struct ContextCommand {
    /// Template family
    #[arg(value_enum)]
    pub family: TemplateFamily,

    #[command(flatten)]
    pub service: ServiceArgs,
}

impl ContextCommand {
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        let spec = self.service.resolve().await?;
        let context = self.family.context_for(&spec, &config.catalog());
        println!("{}", serde_json::to_string_pretty(&context)?);
        Ok(())
    }
}
