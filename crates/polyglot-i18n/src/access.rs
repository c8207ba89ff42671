//! Which locales a user may view or edit

use crate::engine::Engine;
use crate::error::{I18nError, I18nResult};
use crate::translation::Translation;
use tracing::warn;

/// Locale capabilities of a user; every method is optional.
///
/// A user that reports nothing may view and edit the default locale only.
pub trait LocaleAccess {
    /// Locales the user works with in general
    fn available_locales(&self) -> Option<Vec<String>> {
        None
    }

    /// Locales the user may read, overriding [`LocaleAccess::available_locales`]
    fn viewable_locales(&self) -> Option<Vec<String>> {
        None
    }

    /// Locales the user may change, overriding [`LocaleAccess::available_locales`]
    fn editable_locales(&self) -> Option<Vec<String>> {
        None
    }
}

/// A user without any locale capabilities
impl LocaleAccess for () {}

/// Locales `user` may read
pub fn viewable_locales(user: &dyn LocaleAccess, default_locale: &str) -> Vec<String> {
    user.viewable_locales()
        .or_else(|| user.available_locales())
        .unwrap_or_else(|| vec![default_locale.to_string()])
}

/// Locales `user` may change
pub fn editable_locales(user: &dyn LocaleAccess, default_locale: &str) -> Vec<String> {
    user.editable_locales()
        .or_else(|| user.available_locales())
        .unwrap_or_else(|| vec![default_locale.to_string()])
}

impl Engine {
    /// Save `translation` on behalf of `user`, rejecting locales they may not edit
    pub fn update_translation(
        &self,
        translation: &Translation,
        user: &dyn LocaleAccess,
    ) -> I18nResult<()> {
        let editable = editable_locales(user, self.default_locale());
        if !editable.iter().any(|locale| *locale == translation.locale) {
            warn!(
                "Rejected update of {}/{}: locale not editable",
                translation.locale, translation.key
            );
            return Err(I18nError::UnexpectedLocale {
                locale: translation.locale.clone(),
            });
        }
        self.save_translation(translation)
    }
}
