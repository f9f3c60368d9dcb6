//! fnform - serverless function template renderer
//!
//! fnform turns a short description of a serverless function (name, runtime,
//! timeout, memory size) into two deployable documents: an AWS SAM Lambda
//! template and a CodePipeline/CodeBuild template whose build image is chosen
//! from the function's runtime.
//!
//! # Architecture
//!
//! ```text
//! ServiceSpec ──► templating::context ──► RenderContext ─┐
//!                     │                                 ├─► Template::render ──► YAML
//!                     └─ catalog (runtime → image)       │
//! source::TemplateStore (fetch once, compile) ──────────┘
//! ```
//!
//! - [`models`] - The service description and the editor's input rules
//! - [`catalog`] - Runtime identifiers and their CodeBuild images
//! - [`templating`] - Render contexts and the logic-less template renderer
//! - [`source`] - Built-in, file and HTTP template sources
//! - [`config`] - Global configuration (`~/.fnform/config.toml`)
//! - [`core`] - Error types and user-facing error reports
//! - [`cli`] - The `fnform` command-line interface
//!
//! # Behaviour on bad input
//!
//! Rendering never fails because of input values: unknown context keys and
//! runtimes without a build image render as empty text. Malformed templates
//! and unreachable template sources are errors. The CLI can opt into strict
//! checking with `--strict`.
//!
//! # Example
//!
//! ```rust
//! use fnform::models::ServiceSpec;
//! use fnform::templating::{Template, build_lambda_context};
//!
//! let spec = ServiceSpec::new("orders").with_runtime("python3.6");
//! let template = Template::compile("Runtime: {{runtime}}\nMemorySize: {{memorySize}}\n")?;
//!
//! assert_eq!(
//!     template.render(&build_lambda_context(&spec))?,
//!     "Runtime: python3.6\nMemorySize: 128\n"
//! );
//! # Ok::<(), fnform::templating::TemplateError>(())
//! ```

// Core functionality modules
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;

// Templates
pub mod source;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
