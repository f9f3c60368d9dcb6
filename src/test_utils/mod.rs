//! Test utilities for fnform
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration test suite.

pub mod fixtures;

pub use fixtures::{ConfigFixture, SpecFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging once per process.
///
/// With an explicit level, that level is used. Otherwise logging is only
/// enabled when `RUST_LOG` is set.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
