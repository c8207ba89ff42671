//! The translation record and cache key addressing

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Separator between locale and key in cache addresses
pub const CACHE_KEY_SEPARATOR: char = '/';

/// Separator between a scope and the key it prefixes
pub const SCOPE_SEPARATOR: char = '.';

/// A localized string identified by `(locale, key)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Locale identifier, e.g. `en-US`
    pub locale: String,
    /// Dot-scoped key, unique within a locale
    pub key: String,
    /// Localized value
    pub value: String,
    /// Name of the backend that produced or owns this translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl Translation {
    /// Create a translation without an owning backend
    pub fn new(locale: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            key: key.into(),
            value: value.into(),
            backend: None,
        }
    }

    /// Tag the translation with its owning backend
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Cache address of this translation
    pub fn cache_key(&self) -> String {
        cache_key(&self.locale, &self.key)
    }
}

/// Build the cache address of `(locale, key)`
pub fn cache_key(locale: &str, key: &str) -> String {
    let mut address = String::with_capacity(locale.len() + key.len() + 1);
    address.push_str(locale);
    address.push(CACHE_KEY_SEPARATOR);
    address.push_str(key);
    address
}

/// Split a cache address back into `(locale, key)`.
///
/// Locales never contain the separator, keys may.
pub fn split_cache_key(address: &str) -> Option<(&str, &str)> {
    address
        .split_once(CACHE_KEY_SEPARATOR)
        .filter(|(locale, _)| !locale.is_empty())
}

/// Prefix `key` with `scope` when one is set
pub fn scoped_key<'a>(scope: Option<&str>, key: &'a str) -> Cow<'a, str> {
    match scope {
        Some(scope) if !scope.is_empty() => {
            Cow::Owned(format!("{scope}{SCOPE_SEPARATOR}{key}"))
        }
        _ => Cow::Borrowed(key),
    }
}
