use std::path::Path;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use super::{TemplateFetcher, TemplateLocation};
use crate::core::FnformError;
use crate::templating::{Template, TemplateFamily};

#[derive(Debug)]
struct Slot {
    location: TemplateLocation,
    template: OnceCell<Arc<Template>>,
}

impl Slot {
    fn new(location: TemplateLocation) -> Self {
        Self {
            location,
            template: OnceCell::new(),
        }
    }
}

/// Compiled templates, fetched at most once per family.
///
/// Templates read from a file take their partials from the file's directory.
///
/// Concurrent callers asking for the same family share a single fetch. Once a
/// template has been fetched and compiled it is kept for the lifetime of the
/// store and never re-fetched. A failed fetch leaves the slot empty.
#[derive(Debug)]
pub struct TemplateStore {
    fetcher: TemplateFetcher,
    lambda: Slot,
    pipeline: Slot,
}

impl TemplateStore {
    /// A store reading the built-in template of each family.
    #[must_use]
    pub fn new(fetcher: TemplateFetcher) -> Self {
        Self {
            fetcher,
            lambda: Slot::new(TemplateLocation::Builtin(TemplateFamily::Lambda)),
            pipeline: Slot::new(TemplateLocation::Builtin(TemplateFamily::Pipeline)),
        }
    }

    /// Read `family`'s template from `location` instead.
    #[must_use]
    pub fn with_location(mut self, family: TemplateFamily, location: TemplateLocation) -> Self {
        *self.slot_mut(family) = Slot::new(location);
        self
    }

    #[must_use]
    pub fn location(&self, family: TemplateFamily) -> &TemplateLocation {
        &self.slot(family).location
    }

    /// Whether `family`'s template has been fetched and compiled.
    #[must_use]
    pub fn is_loaded(&self, family: TemplateFamily) -> bool {
        self.slot(family).template.initialized()
    }

    /// The compiled template for `family`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// [`FnformError::TemplateFetch`] when the text cannot be retrieved and
    /// [`FnformError::TemplateSyntax`] when it does not compile.
    pub async fn get(&self, family: TemplateFamily) -> Result<Arc<Template>, FnformError> {
        let slot = self.slot(family);
        let template = slot
            .template
            .get_or_try_init(|| async {
                let text = self.fetcher.fetch(&slot.location).await?;
                let compiled = match &slot.location {
                    TemplateLocation::File(path) => {
                        let dir = path.parent().unwrap_or_else(|| Path::new("."));
                        Template::compile_with_partials(&text, dir)
                    }
                    _ => Template::compile(&text),
                };
                let template = compiled.map_err(|source| FnformError::TemplateSyntax {
                    identifier: slot.location.to_string(),
                    source,
                })?;
                debug!("Compiled {} template from {}", family, slot.location);
                Ok::<_, FnformError>(Arc::new(template))
            })
            .await?;
        Ok(Arc::clone(template))
    }

    fn slot(&self, family: TemplateFamily) -> &Slot {
        match family {
            TemplateFamily::Lambda => &self.lambda,
            TemplateFamily::Pipeline => &self.pipeline,
        }
    }

    fn slot_mut(&mut self, family: TemplateFamily) -> &mut Slot {
        match family {
            TemplateFamily::Lambda => &mut self.lambda,
            TemplateFamily::Pipeline => &mut self.pipeline,
        }
    }
}
