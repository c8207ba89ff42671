//! Configuration loading with environment variable overrides

use crate::schema::Config;
use crate::validator::ConfigValidator;
use polyglot_common::{LogFormat, PolyglotError, Result as PolyglotResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Path of the configuration file, overriding the search in the working directory
pub const CONFIG_PATH_VAR: &str = "POLYGLOT_CONFIG_PATH";
/// Overrides `i18n.default_locale`
pub const DEFAULT_LOCALE_VAR: &str = "POLYGLOT_DEFAULT_LOCALE";
/// Overrides `logging.level`
pub const LOG_LEVEL_VAR: &str = "POLYGLOT_LOG_LEVEL";
/// Overrides `logging.format`
pub const LOG_FORMAT_VAR: &str = "POLYGLOT_LOG_FORMAT";

/// File names searched in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["polyglot.yaml", "polyglot.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the offending variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for PolyglotError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides.
    ///
    /// Relative backend paths are resolved against the file's directory.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |name| env::var(name).ok())
    }

    /// Like [`ConfigLoader::load_config`], reading overrides through `lookup`
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config = config.relative_to(base);
        }

        Self::apply_overrides(&mut config, lookup)?;
        Self::validate(&config)?;

        info!(
            "Loaded configuration from {:?} with {} backends",
            path,
            config.backends.len()
        );
        Ok(config)
    }

    /// Parse a YAML document without overrides or validation
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from the environment and the working directory.
    ///
    /// Uses `POLYGLOT_CONFIG_PATH` when set, else the first existing file of
    /// [`DEFAULT_CONFIG_FILES`], else the defaults.
    pub fn load() -> PolyglotResult<Config> {
        let config = match Self::find_config_file() {
            Some(path) => Self::load_config(path)?,
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                Self::validate(&config)?;
                config
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PolyglotResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Configuration file that [`ConfigLoader::load`] would read
    pub fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Apply `POLYGLOT_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |name| env::var(name).ok())
    }

    fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(DEFAULT_LOCALE_VAR) {
            config.i18n.default_locale = locale;
        }

        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            config.logging.level = level;
        }

        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.logging.format =
                format
                    .parse::<LogFormat>()
                    .map_err(|e| ConfigError::EnvParseError {
                        var: LOG_FORMAT_VAR.to_string(),
                        source: Box::new(e),
                    })?;
        }

        Ok(())
    }

    fn validate(config: &Config) -> Result<(), ConfigError> {
        let problems = ConfigValidator::validate(config);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(problems))
        }
    }
}
