//! # Polyglot I18n
//!
//! Translation cache and resolution engine for Polyglot.
//!
//! Translations are `(locale, key) -> value` strings aggregated from one or
//! more [`Backend`]s into a [`CacheStore`]. Lookups read the cache, walk a
//! locale fallback chain on a miss, and persist keys they have never seen
//! back into the first writable backend so that they show up for
//! translators.
//!
//! ```rust
//! use polyglot_i18n::{fluent_args, Engine, MemoryBackend, Translation};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::builder()
//!     .backend(MemoryBackend::new())
//!     .fallback("en-AU", ["en-GB"])
//!     .build()?;
//!
//! engine.add_translation(&Translation::new("en-GB", "colour", "Colour"))?;
//! assert_eq!(engine.t("en-AU", "colour"), "Colour");
//!
//! let args = fluent_args!["name" => "Alice"];
//! let greeting = engine.default("Hello, { $name }!").translate("en-US", "greeting", args.as_ref());
//! assert_eq!(greeting, "Hello, Alice!");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod access;
pub mod backend;
pub mod backends;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod fallback;
pub mod format;
pub mod store;
pub mod translation;
pub mod view;

pub use access::{editable_locales, viewable_locales, LocaleAccess};
pub use backend::Backend;
pub use backends::{FileBackend, MemoryBackend, YamlBackend};
pub use catalog::{KeyPage, KeyQuery, Page, DEFAULT_PER_PAGE};
pub use engine::{Engine, EngineBuilder, DEFAULT_LOCALE};
pub use error::{I18nError, I18nResult};
pub use exchange::{ImportSummary, TranslationTable};
pub use fluent::{FluentArgs, FluentValue};
pub use format::{FluentFormatter, Formatter};
pub use store::{CacheStore, CacheStoreExt, MemoryStore};
pub use translation::Translation;
pub use view::View;
