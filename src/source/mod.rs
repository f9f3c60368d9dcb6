//! Template sources for fnform.
//!
//! Template text lives outside the renderer: compiled into the binary, in a
//! local file, or behind an HTTP(S) URL. This module locates and retrieves it.
//!
//! # Components
//!
//! - [`TemplateLocation`] - Where a template is read from (`builtin:lambda`, a path, a URL)
//! - [`TemplateFetcher`] - Retrieves template text, one attempt per call
//! - [`TemplateStore`] - Fetches and compiles each family's template at most once
//!
//! # Failure behaviour
//!
//! A failed fetch is reported as a [`FetchError`] and nothing is rendered.
//! Fetches are never retried; a later call on a [`TemplateStore`] whose fetch
//! failed tries again from scratch.

mod fetcher;
mod location;
mod store;

pub use fetcher::{TemplateFetcher, builtin_template};
pub use location::TemplateLocation;
pub use store::TemplateStore;

use thiserror::Error;

/// Failure to retrieve template text.
///
/// Each variant carries the identifier of the template that was requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Failed to fetch template '{identifier}': HTTP {status}")]
    Status {
        identifier: String,
        status: u16,
    },

    /// The request could not be completed
    #[error("Failed to fetch template '{identifier}': {reason}")]
    Network {
        identifier: String,
        reason: String,
    },

    /// A local template file could not be read
    #[error("Failed to read template '{identifier}': {reason}")]
    Read {
        identifier: String,
        reason: String,
    },
}

impl FetchError {
    /// Identifier of the template that failed to load.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Status {
                identifier,
                ..
            }
            | Self::Network {
                identifier,
                ..
            }
            | Self::Read {
                identifier,
                ..
            } => identifier,
        }
    }
}
