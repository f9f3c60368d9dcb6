use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::{FetchError, TemplateLocation};
use crate::templating::TemplateFamily;

const LAMBDA_TEMPLATE: &str = include_str!("../../templates/lambda.yaml");
const PIPELINE_TEMPLATE: &str = include_str!("../../templates/pipeline.yaml");

/// Text of a built-in template.
#[must_use]
pub const fn builtin_template(family: TemplateFamily) -> &'static str {
    match family {
        TemplateFamily::Lambda => LAMBDA_TEMPLATE,
        TemplateFamily::Pipeline => PIPELINE_TEMPLATE,
    }
}

/// Retrieves template text from a [`TemplateLocation`].
///
/// Each call to [`fetch`](Self::fetch) makes exactly one attempt. Caching
/// belongs to [`TemplateStore`](super::TemplateStore).
#[derive(Debug, Clone)]
pub struct TemplateFetcher {
    client: Client,
}

impl TemplateFetcher {
    /// Create a fetcher whose HTTP requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fnform/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
        })
    }

    /// Read the template text at `location`.
    pub async fn fetch(&self, location: &TemplateLocation) -> Result<String, FetchError> {
        debug!("Fetching template from {}", location);

        match location {
            TemplateLocation::Builtin(family) => Ok(builtin_template(*family).to_string()),
            TemplateLocation::File(path) => {
                tokio::fs::read_to_string(path).await.map_err(|e| FetchError::Read {
                    identifier: location.to_string(),
                    reason: e.to_string(),
                })
            }
            TemplateLocation::Url(url) => self.fetch_url(url).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        let network_error = |e: reqwest::Error| FetchError::Network {
            identifier: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                identifier: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(network_error)?;
        debug!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }
}
