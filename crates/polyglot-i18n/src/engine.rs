//! Translation engine: cache, backends, and the lookup algorithm

use crate::backend::Backend;
use crate::error::{I18nError, I18nResult};
use crate::fallback;
use crate::format::{FluentFormatter, Formatter};
use crate::store::{CacheStore, CacheStoreExt, MemoryStore};
use crate::translation::{cache_key, scoped_key, split_cache_key, Translation};
use crate::view::{Overrides, View};
use fluent::FluentArgs;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Locale used when none is configured
pub const DEFAULT_LOCALE: &str = "en-US";

/// State shared by an engine and every view derived from it
struct Shared {
    /// Backends in priority order; index 0 is the primary write target
    backends: Vec<Arc<dyn Backend>>,
    store: Arc<dyn CacheStore>,
    formatter: Arc<dyn Formatter>,
    /// Configured fallback locales per locale
    fallbacks: HashMap<String, Vec<String>>,
    default_locale: String,
}

/// Resolves translations from a cache populated by one or more backends.
///
/// The engine is a cheap handle: clones and [`View`]s share the same cache
/// and backend list. Only the cache store is mutated after construction and
/// it carries its own synchronisation, so lookups take no engine-level lock.
#[derive(Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

/// Builder for [`Engine`]
pub struct EngineBuilder {
    backends: Vec<Arc<dyn Backend>>,
    store: Option<Arc<dyn CacheStore>>,
    formatter: Option<Arc<dyn Formatter>>,
    fallbacks: HashMap<String, Vec<String>>,
    default_locale: String,
}

impl EngineBuilder {
    fn new() -> Self {
        Self {
            backends: Vec::new(),
            store: None,
            formatter: None,
            fallbacks: HashMap::new(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Append a backend; earlier backends take priority
    #[must_use]
    pub fn backend<B: Backend + 'static>(self, backend: B) -> Self {
        self.shared_backend(Arc::new(backend))
    }

    /// Append an already shared backend
    #[must_use]
    pub fn shared_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Append several shared backends in priority order
    #[must_use]
    pub fn backends<I>(mut self, backends: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Backend>>,
    {
        self.backends.extend(backends);
        self
    }

    /// Replace the default in-memory cache store
    #[must_use]
    pub fn store<S: CacheStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Replace the default Fluent formatter
    #[must_use]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Locale consulted last and used for discovered keys
    #[must_use]
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Configure the fallback locales of `locale`
    #[must_use]
    pub fn fallback<I, S>(mut self, locale: impl Into<String>, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks
            .insert(locale.into(), fallbacks.into_iter().map(Into::into).collect());
        self
    }

    /// Build the engine and load every backend into the cache.
    ///
    /// Backend names identify the owner of each cached translation, so they
    /// must be unique.
    pub fn build(self) -> I18nResult<Engine> {
        let mut names = HashSet::new();
        if let Some(duplicate) = self
            .backends
            .iter()
            .map(|backend| backend.name())
            .find(|name| !names.insert(*name))
        {
            return Err(I18nError::DuplicateBackend {
                name: duplicate.to_string(),
            });
        }

        let engine = Engine {
            shared: Arc::new(Shared {
                backends: self.backends,
                store: self.store.unwrap_or_else(|| Arc::new(MemoryStore::new())),
                formatter: self
                    .formatter
                    .unwrap_or_else(|| Arc::new(FluentFormatter::new())),
                fallbacks: self.fallbacks,
                default_locale: self.default_locale,
            }),
        };

        let loaded = engine.reload()?;
        info!(
            "Engine initialized with {} translations from {} backends, default locale {}",
            loaded,
            engine.shared.backends.len(),
            engine.shared.default_locale
        );
        Ok(engine)
    }
}

impl Engine {
    /// Start building an engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Load every backend into the cache.
    ///
    /// Backends load in reverse priority order so that entries of earlier
    /// backends overwrite later ones. Existing cache entries are kept unless
    /// a backend provides the same `(locale, key)`.
    pub fn reload(&self) -> I18nResult<usize> {
        let mut loaded = 0;
        for backend in self.shared.backends.iter().rev() {
            let translations = backend.load_translations().map_err(|err| match err {
                I18nError::BackendUnavailable { .. } => err,
                other => I18nError::backend(backend.name(), other.to_string()),
            })?;

            let count = translations.len();
            for translation in translations {
                self.add_translation(&translation.with_backend(backend.name()))?;
            }

            debug!("Loaded {} translations from backend '{}'", count, backend.name());
            loaded += count;
        }
        Ok(loaded)
    }

    /// Write a translation into the cache without touching any backend
    pub fn add_translation(&self, translation: &Translation) -> I18nResult<()> {
        self.shared
            .store
            .marshal(&translation.cache_key(), translation)
    }

    /// Persist a translation into the first backend that accepts it, then cache it
    pub fn save_translation(&self, translation: &Translation) -> I18nResult<()> {
        let mut errors = Vec::new();

        for backend in &self.shared.backends {
            match backend.save_translation(translation) {
                Ok(()) => {
                    debug!(
                        "Saved {}/{} to backend '{}'",
                        translation.locale,
                        translation.key,
                        backend.name()
                    );
                    return self.add_translation(&translation.clone().with_backend(backend.name()));
                }
                Err(err) => {
                    debug!("Backend '{}' rejected save: {}", backend.name(), err);
                    errors.push(format!("{}: {}", backend.name(), err));
                }
            }
        }

        Err(I18nError::AllBackendsRejected {
            locale: translation.locale.clone(),
            key: translation.key.clone(),
            errors,
        })
    }

    /// Delete a translation from every backend, then from the cache.
    ///
    /// Only a failure of the owning backend is reported; in that case the
    /// cache entry is kept. Deleting an unknown translation succeeds.
    pub fn delete_translation(&self, translation: &Translation) -> I18nResult<()> {
        let owner = translation.backend.clone().or_else(|| {
            self.cached(&translation.locale, &translation.key)
                .and_then(|cached| cached.backend)
        });

        let mut owner_error = None;
        for backend in &self.shared.backends {
            if let Err(err) = backend.delete_translation(translation) {
                if owner.as_deref() == Some(backend.name()) {
                    warn!(
                        "Owning backend '{}' failed to delete {}/{}: {}",
                        backend.name(),
                        translation.locale,
                        translation.key,
                        err
                    );
                    owner_error = Some(err);
                } else {
                    debug!("Backend '{}' skipped delete: {}", backend.name(), err);
                }
            }
        }

        if let Some(err) = owner_error {
            return Err(err);
        }

        self.shared.store.delete(&translation.cache_key())
    }

    /// Translate `key` for `locale`, interpolating `args`.
    ///
    /// Never fails: a key missing everywhere is persisted for the default
    /// locale and rendered as its own text.
    pub fn translate(&self, locale: &str, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        self.resolve(&Overrides::default(), locale, key, args)
    }

    /// Translate `key` for `locale` without arguments
    pub fn t(&self, locale: &str, key: &str) -> String {
        self.translate(locale, key, None)
    }

    /// Raw cached value without discovery or formatting.
    ///
    /// Returns the non-empty value stored for `locale`, else, when
    /// `with_default` is set, whatever is stored for the default locale.
    pub fn lookup(&self, locale: &str, key: &str, with_default: bool) -> Option<String> {
        self.cached_value(locale, key).or_else(|| {
            with_default
                .then(|| self.cached(self.default_locale(), key))
                .flatten()
                .map(|translation| translation.value)
        })
    }

    /// The cached translation at `(locale, key)`
    pub fn cached(&self, locale: &str, key: &str) -> Option<Translation> {
        self.read(&cache_key(locale, key))
    }

    /// Every cached translation, ordered by locale then key
    pub fn translations(&self) -> I18nResult<Vec<Translation>> {
        let mut translations: Vec<Translation> = self
            .shared
            .store
            .keys()?
            .iter()
            .filter(|address| split_cache_key(address).is_some())
            .filter_map(|address| self.read(address))
            .collect();

        translations.sort_by(|a, b| (&a.locale, &a.key).cmp(&(&b.locale, &b.key)));
        Ok(translations)
    }

    /// Every locale with at least one cached translation, sorted
    pub fn locales(&self) -> I18nResult<Vec<String>> {
        let locales: BTreeSet<String> = self
            .shared
            .store
            .keys()?
            .iter()
            .filter_map(|address| split_cache_key(address).map(|(locale, _)| locale.to_string()))
            .collect();
        Ok(locales.into_iter().collect())
    }

    /// The global fallback locale
    pub fn default_locale(&self) -> &str {
        &self.shared.default_locale
    }

    /// Backends in priority order
    pub fn backends(&self) -> &[Arc<dyn Backend>] {
        &self.shared.backends
    }

    /// Configured fallback locales of `locale`
    pub fn fallbacks_for(&self, locale: &str) -> &[String] {
        self.shared
            .fallbacks
            .get(locale)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// A view resolving keys below `scope`
    pub fn scope(&self, scope: impl Into<String>) -> View {
        self.view().scope(scope)
    }

    /// A view using `value` for discovered keys
    pub fn default(&self, value: impl Into<String>) -> View {
        self.view().default(value)
    }

    /// A view consulting `locales` before the configured fallbacks
    pub fn fallbacks<I, S>(&self, locales: I) -> View
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view().fallbacks(locales)
    }

    /// A view without overrides
    pub fn view(&self) -> View {
        View::new(self.clone(), Overrides::default())
    }

    pub(crate) fn resolve(
        &self,
        overrides: &Overrides,
        locale: &str,
        key: &str,
        args: Option<&FluentArgs<'_>>,
    ) -> String {
        let effective_key = scoped_key(overrides.scope.as_deref(), key);
        let default_locale = self.default_locale();
        let locale = if locale.is_empty() { default_locale } else { locale };

        let resolved = self
            .cached_value(locale, &effective_key)
            .or_else(|| {
                fallback::candidates(
                    locale,
                    &overrides.fallbacks,
                    &self.shared.fallbacks,
                    default_locale,
                )
                .iter()
                .find_map(|candidate| self.cached_value(candidate, &effective_key))
            })
            .or_else(|| {
                self.cached(default_locale, &effective_key)
                    .map(|translation| translation.value)
            });

        let value = resolved.unwrap_or_else(|| {
            let value = overrides
                .default
                .as_deref()
                .filter(|value| !value.is_empty())
                .unwrap_or(key);
            self.discover(&effective_key, value);
            value.to_string()
        });

        let rendered = match self.shared.formatter.format(locale, &value, args) {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!("Using unformatted value for '{}': {}", effective_key, err);
                value
            }
        };

        if rendered.is_empty() {
            key.to_string()
        } else {
            rendered
        }
    }

    /// Persist a key seen for the first time; concurrent discoveries of the
    /// same key may each write, the last one wins.
    fn discover(&self, key: &str, value: &str) {
        let translation = Translation::new(self.default_locale(), key, value);
        match self.save_translation(&translation) {
            Ok(()) => debug!("Discovered translation key '{}'", key),
            Err(err) => debug!("Could not persist discovered key '{}': {}", key, err),
        }
    }

    fn cached_value(&self, locale: &str, key: &str) -> Option<String> {
        self.cached(locale, key)
            .map(|translation| translation.value)
            .filter(|value| !value.is_empty())
    }

    fn read(&self, address: &str) -> Option<Translation> {
        match self.shared.store.unmarshal::<Translation>(address) {
            Ok(translation) => Some(translation),
            Err(err) if err.is_not_found() => None,
            Err(err) => {
                warn!("Ignoring unreadable cache entry '{}': {}", address, err);
                None
            }
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backends: Vec<&str> = self.shared.backends.iter().map(|b| b.name()).collect();
        f.debug_struct("Engine")
            .field("default_locale", &self.shared.default_locale)
            .field("backends", &backends)
            .field("fallbacks", &self.shared.fallbacks)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("backends", &self.backends.len())
            .field("default_locale", &self.default_locale)
            .finish_non_exhaustive()
    }
}
