//! In-memory backend, useful for tests and scratch translations

use crate::backend::Backend;
use crate::error::{I18nError, I18nResult};
use crate::translation::{cache_key, Translation};
use dashmap::DashMap;
use tracing::trace;

/// Backend holding translations in a concurrent map
#[derive(Debug)]
pub struct MemoryBackend {
    name: String,
    read_only: bool,
    translations: DashMap<String, Translation>,
}

impl MemoryBackend {
    /// Create an empty writable backend named `memory`
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Create an empty writable backend with a custom name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
            translations: DashMap::new(),
        }
    }

    /// Seed the backend with `translations`
    #[must_use]
    pub fn with_translations<I>(self, translations: I) -> Self
    where
        I: IntoIterator<Item = Translation>,
    {
        for translation in translations {
            self.insert(translation);
        }
        self
    }

    /// Reject saves and deletes while still serving loads
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Insert a translation directly, bypassing the read-only flag
    pub fn insert(&self, translation: Translation) {
        self.translations.insert(translation.cache_key(), translation);
    }

    /// The stored translation at `(locale, key)`
    pub fn get(&self, locale: &str, key: &str) -> Option<Translation> {
        self.translations
            .get(&cache_key(locale, key))
            .map(|entry| entry.value().clone())
    }

    /// Number of stored translations
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// Whether the backend holds nothing
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    fn ensure_writable(&self) -> I18nResult<()> {
        if self.read_only {
            return Err(I18nError::backend(&self.name, "backend is read-only"));
        }
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_translations(&self) -> I18nResult<Vec<Translation>> {
        Ok(self
            .translations
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn save_translation(&self, translation: &Translation) -> I18nResult<()> {
        self.ensure_writable()?;
        trace!("{}: save {}", self.name, translation.cache_key());
        let mut stored = translation.clone();
        stored.backend = None;
        self.insert(stored);
        Ok(())
    }

    fn delete_translation(&self, translation: &Translation) -> I18nResult<()> {
        self.ensure_writable()?;
        trace!("{}: delete {}", self.name, translation.cache_key());
        self.translations.remove(&translation.cache_key());
        Ok(())
    }
}
