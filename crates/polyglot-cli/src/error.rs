//! Application-wide error types using thiserror.

use polyglot_common::PolyglotError;
use polyglot_config::ConfigError;
use polyglot_i18n::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration or logging setup error.
    #[error(transparent)]
    Common(#[from] PolyglotError),

    /// Configuration file error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Translation engine error.
    #[error("Translation error: {0}")]
    I18n(#[from] I18nError),

    /// Translation table could not be read or written.
    #[error("Invalid translation table: {0}")]
    Table(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
