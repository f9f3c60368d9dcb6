//! Logic-less templating for Lambda and CodePipeline documents.
//!
//! This module holds the render contexts and a renderer built on the
//! [`mustache`] crate.
//! A template is rendered against a flat [`RenderContext`] built from the
//! service description; the two [`TemplateFamily`] values each have their own
//! context shape (see [`context`]).
//!
//! # Supported syntax
//!
//! - `{{name}}`: substitution with `& < > " '` HTML-escaped
//! - `{{{name}}}` and `{{&name}}`: raw substitution
//! - `{{#name}}...{{/name}}`: section, rendered per truthiness of `name`
//! - `{{^name}}...{{/name}}`: inverted section
//! - `{{.}}`: the current item inside a section
//! - `{{a.b}}`: dotted lookup
//! - `{{! comment }}`: dropped from output
//! - `{{> partial}}`: contents of `partial.mustache`, or empty when absent
//! - `{{=<% %>=}}`: delimiter change
//!
//! Standalone section, comment, partial and delimiter tags remove their whole
//! line. A tag that directly follows a section's closing tag on the next line
//! is not standalone, so templates keep a plain line between two sections.
//! Unknown names render empty. Malformed syntax is reported when the template
//! is compiled; see [`renderer`] for how context values render.
//!
//! # Examples
//!
//! ```rust
//! use fnform::models::ServiceSpec;
//! use fnform::templating::{Template, build_pipeline_context};
//!
//! let template = Template::compile(
//!     "Image: {{#buildImage}}{{{buildImage}}}{{/buildImage}}{{^buildImage}}none{{/buildImage}}",
//! )?;
//!
//! let known = build_pipeline_context("svc", "nodejs4.3");
//! assert_eq!(template.render(&known)?, "Image: aws/codebuild/eb-nodejs-4.4.6-amazonlinux-64:2.1.3");
//!
//! let unknown = build_pipeline_context("svc", "ruby2.5");
//! assert_eq!(template.render(&unknown)?, "Image: none");
//! # Ok::<(), fnform::templating::TemplateError>(())
//! ```

pub mod context;
pub mod error;
pub mod renderer;

pub use context::{
    RenderContext, TemplateFamily, build_lambda_context, build_pipeline_context,
    build_pipeline_context_with,
};
pub use error::TemplateError;
pub use renderer::{Template, render};
