//! # Polyglot Config
//!
//! Typed configuration for Polyglot.
//!
//! This crate provides the YAML schema, its defaults, validation of locale
//! identifiers and a loader applying `POLYGLOT_*` environment overrides.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{BackendConfig, Config, I18nConfig};
pub use validator::ConfigValidator;
