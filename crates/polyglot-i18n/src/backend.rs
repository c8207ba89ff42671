//! Translation storage backends

use crate::error::I18nResult;
use crate::translation::Translation;

/// A pluggable storage adapter providing bulk load, save, and delete.
///
/// Backends are shared across threads by the engine. `load_translations` may
/// be expensive but must be finite and restartable: the engine calls it once
/// at startup and again on every reload.
pub trait Backend: Send + Sync {
    /// Stable name used to tag translations owned by this backend
    fn name(&self) -> &str;

    /// Load every translation held by the backend
    fn load_translations(&self) -> I18nResult<Vec<Translation>>;

    /// Insert or update a translation
    fn save_translation(&self, translation: &Translation) -> I18nResult<()>;

    /// Remove a translation; removing an absent translation succeeds
    fn delete_translation(&self, translation: &Translation) -> I18nResult<()>;
}
