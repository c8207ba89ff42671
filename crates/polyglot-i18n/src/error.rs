//! Error types for translation operations

use thiserror::Error;

/// Errors that can occur while loading, storing, or resolving translations
#[derive(Error, Debug)]
pub enum I18nError {
    /// A backend failed to load, save, or delete
    #[error("Backend '{backend}' unavailable: {message}")]
    BackendUnavailable {
        /// Name of the failing backend
        backend: String,
        /// Failure detail
        message: String,
    },

    /// Two backends share a name, so ownership would be ambiguous
    #[error("Duplicate backend name '{name}'")]
    DuplicateBackend {
        /// The shared name
        name: String,
    },

    /// Cache entry does not exist
    #[error("Translation not found: {key}")]
    NotFound {
        /// Cache address
        key: String,
    },

    /// Cache entry exists but could not be decoded
    #[error("Failed to decode cache entry '{key}': {message}")]
    DecodeError {
        /// Cache address
        key: String,
        /// Decoder message
        message: String,
    },

    /// Every configured backend refused a save
    #[error("All backends rejected translation {locale}/{key}: {errors:?}")]
    AllBackendsRejected {
        /// Locale of the rejected translation
        locale: String,
        /// Key of the rejected translation
        key: String,
        /// One `backend: error` entry per backend
        errors: Vec<String>,
    },

    /// Cache store failed to serialize or persist a value
    #[error("Cache store error: {message}")]
    Store {
        /// Failure detail
        message: String,
    },

    /// Failed to interpolate arguments into a translation
    #[error("Failed to format translation: {message}")]
    FormatError {
        /// Fluent parser or resolver errors
        message: String,
    },

    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to read or parse a translation resource file
    #[error("Failed to load resource file {path}: {message}")]
    ResourceLoadError {
        /// File that failed
        path: String,
        /// Failure detail
        message: String,
    },

    /// Locale is not editable for the requesting user
    #[error("Requested locale '{locale}' is unexpected")]
    UnexpectedLocale {
        /// The rejected locale
        locale: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl I18nError {
    /// Shorthand for a [`I18nError::BackendUnavailable`]
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`I18nError::Store`]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Whether this error only signals an absent entry
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
