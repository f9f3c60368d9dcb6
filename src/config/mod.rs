//! Configuration management for fnform
//!
//! fnform has a single configuration layer: the user-wide
//! [`GlobalConfig`] file. Command-line flags override it per invocation
//! (`--strict`, `--template`), and service descriptions are never stored in
//! configuration.
//!
//! See [`global`] for the file format and its location.

pub mod global;

pub use global::{GlobalConfig, RuntimeConfig, TemplateSources};
