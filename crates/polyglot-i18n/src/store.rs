//! Cache store used as the engine's working set

use crate::error::{I18nError, I18nResult};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

/// Key to bytes persistence.
///
/// Implementations own their synchronisation: `get`, `set`, and `delete` on a
/// single key must be linearizable. Nothing is assumed atomic across keys, and
/// every call may fail so that a remote store can stand in for the default.
pub trait CacheStore: Send + Sync {
    /// Raw bytes stored at `key`, `None` on a miss
    fn get(&self, key: &str) -> I18nResult<Option<Vec<u8>>>;

    /// Store `value` at `key`, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> I18nResult<()>;

    /// Remove `key`; removing an absent key succeeds
    fn delete(&self, key: &str) -> I18nResult<()>;

    /// Every key currently stored
    fn keys(&self) -> I18nResult<Vec<String>>;
}

/// Typed access on top of any [`CacheStore`]
pub trait CacheStoreExt: CacheStore {
    /// Decode the value at `key`.
    ///
    /// Fails with [`I18nError::NotFound`] if absent and
    /// [`I18nError::DecodeError`] if malformed.
    fn unmarshal<T: DeserializeOwned>(&self, key: &str) -> I18nResult<T> {
        let bytes = self.get(key)?.ok_or_else(|| I18nError::NotFound {
            key: key.to_string(),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| I18nError::DecodeError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Encode `value` and store it at `key`
    fn marshal<T: Serialize>(&self, key: &str, value: &T) -> I18nResult<()> {
        let bytes = serde_json::to_vec(value).map_err(|e| I18nError::store(e.to_string()))?;
        self.set(key, &bytes)
    }
}

impl<S: CacheStore + ?Sized> CacheStoreExt for S {}

/// In-process store: a read-write lock around a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> I18nResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> I18nResult<()> {
        trace!("cache set {}", key);
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> I18nResult<()> {
        trace!("cache delete {}", key);
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> I18nResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}
