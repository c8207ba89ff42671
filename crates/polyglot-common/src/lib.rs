//! # Polyglot Common
//!
//! Shared error types, logging setup, and test utilities for Polyglot.
//!
//! This crate provides the foundational pieces used across
//! all other crates in the Polyglot workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{PolyglotError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
