//! Integration test suite for fnform
//!
//! End-to-end tests that run the `fnform` binary and the public library API.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: Command-line behaviour, output formats and exit status
//! - **config**: Global configuration (runtimes, template overrides, strict mode)
//! - **rendering**: Template rendering through the library API

use assert_cmd::Command;
use std::path::Path;

mod cli;
mod config;
mod rendering;

/// The `fnform` binary, isolated from the user's configuration and log settings.
pub fn fnform(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fnform").unwrap();
    cmd.current_dir(temp)
        .env("FNFORM_CONFIG", temp.join("no-config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}
