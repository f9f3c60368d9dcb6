//! Core types and error handling for fnform
//!
//! This module holds the crate-wide error type ([`FnformError`]) and the
//! user-facing error reporting used by the CLI ([`ErrorContext`],
//! [`user_friendly_error`]).

pub mod error;

pub use error::{ErrorContext, FnformError, user_friendly_error};
