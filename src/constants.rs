//! Global constants used throughout the fnform codebase.
//!
//! Form defaults and limits mirror the rules the function editor applies to
//! user input; they are enforced by validation, never by the renderer.

use std::time::Duration;

/// Runtime selected when none is given.
pub const DEFAULT_RUNTIME: &str = "nodejs6.10";

/// Default function timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 3;

/// Smallest accepted function timeout in seconds.
pub const MIN_TIMEOUT_SECS: u32 = 1;

/// Largest accepted function timeout in seconds.
pub const MAX_TIMEOUT_SECS: u32 = 300;

/// Default function memory size in MB.
pub const DEFAULT_MEMORY_SIZE_MB: u32 = 128;

/// Smallest accepted memory size in MB.
pub const MIN_MEMORY_SIZE_MB: u32 = 128;

/// Largest accepted memory size in MB.
pub const MAX_MEMORY_SIZE_MB: u32 = 1536;

/// Memory sizes must be a multiple of this step above the minimum.
pub const MEMORY_SIZE_STEP_MB: u32 = 64;

/// Timeout applied to HTTP template fetches (30 seconds).
///
/// Fetches are never retried; a request that exceeds this limit is reported
/// as a network failure.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of characters of rendered output included in debug logs.
pub const RENDER_PREVIEW_CHARS: usize = 100;

/// Maximum Levenshtein distance, as a percentage of the input length, for a
/// catalog entry to be offered as a "did you mean" suggestion.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Environment variable that overrides the global config file location.
pub const CONFIG_ENV_VAR: &str = "FNFORM_CONFIG";
