//! # Polyglot CLI
//!
//! Command line front end for the Polyglot translation engine.
//!
//! The binary loads the configuration, installs logging, builds the engine
//! from the configured backends and runs a single command against it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::App;
pub use cli::{Cli, Command, TableFormat};
pub use error::{AppError, AppResult};
