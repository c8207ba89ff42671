//! Default values of the configuration schema.

use crate::schema::{BackendConfig, Config, I18nConfig};
use polyglot_common::LoggingConfig;
use std::collections::BTreeMap;

/// Default locale when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n: I18nConfig::default(),
            backends: vec![BackendConfig::default()],
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            fallbacks: BTreeMap::new(),
        }
    }
}

/// A writable in-memory backend.
impl Default for BackendConfig {
    fn default() -> Self {
        Self::Memory {
            name: None,
            read_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.i18n.default_locale, "en-US");
        assert!(config.i18n.fallbacks.is_empty());
        assert_eq!(config.backends, vec![BackendConfig::default()]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
