//! Derived lookup handles with a scope, default value, or fallback locales

use crate::engine::Engine;
use fluent::FluentArgs;
use std::fmt;

/// Per-view lookup settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) scope: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) fallbacks: Vec<String>,
}

/// An immutable handle over an [`Engine`] that decorates lookups.
///
/// Views share the engine's cache and backends; building one only copies the
/// three override fields, and every builder returns a new view.
///
/// ```rust
/// use polyglot_i18n::{Engine, MemoryBackend, Translation};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = Engine::builder().backend(MemoryBackend::new()).build()?;
/// engine.add_translation(&Translation::new("en-US", "user.name", "Name"))?;
///
/// let user = engine.scope("user");
/// assert_eq!(user.t("en-US", "name"), "Name");
/// assert_eq!(user.default("Address").t("en-US", "address"), "Address");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone)]
pub struct View {
    engine: Engine,
    overrides: Overrides,
}

impl View {
    pub(crate) fn new(engine: Engine, overrides: Overrides) -> Self {
        Self { engine, overrides }
    }

    /// Resolve keys below `scope`, replacing any previous scope
    #[must_use]
    pub fn scope(&self, scope: impl Into<String>) -> Self {
        self.derive(|overrides| overrides.scope = Some(scope.into()))
    }

    /// Use `value` instead of the key text when a lookup discovers a new key
    #[must_use]
    pub fn default(&self, value: impl Into<String>) -> Self {
        self.derive(|overrides| overrides.default = Some(value.into()))
    }

    /// Consult `locales`, in order, before the configured fallbacks
    #[must_use]
    pub fn fallbacks<I, S>(&self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        self.derive(|overrides| overrides.fallbacks = locales)
    }

    /// Translate `key` for `locale`, interpolating `args`
    pub fn translate(&self, locale: &str, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        self.engine.resolve(&self.overrides, locale, key, args)
    }

    /// Translate `key` for `locale` without arguments
    pub fn t(&self, locale: &str, key: &str) -> String {
        self.translate(locale, key, None)
    }

    /// The engine this view reads through
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Current scope prefix
    pub fn scope_prefix(&self) -> Option<&str> {
        self.overrides.scope.as_deref()
    }

    /// Current default value
    pub fn default_value(&self) -> Option<&str> {
        self.overrides.default.as_deref()
    }

    /// Explicit fallback locales
    pub fn fallback_locales(&self) -> &[String] {
        &self.overrides.fallbacks
    }

    fn derive(&self, change: impl FnOnce(&mut Overrides)) -> Self {
        let mut overrides = self.overrides.clone();
        change(&mut overrides);
        Self::new(self.engine.clone(), overrides)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("scope", &self.overrides.scope)
            .field("default", &self.overrides.default)
            .field("fallbacks", &self.overrides.fallbacks)
            .finish_non_exhaustive()
    }
}
