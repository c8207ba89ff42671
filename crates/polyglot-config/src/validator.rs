//! Runtime validation of a loaded configuration.

use crate::schema::{BackendConfig, Config};
use unic_langid::LanguageIdentifier;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Collect every problem of `config`; an empty list means it is valid.
    pub fn validate(config: &Config) -> Vec<String> {
        let mut problems = Vec::new();

        if let Err(problem) = validate_locale(&config.i18n.default_locale) {
            problems.push(format!("i18n.default_locale: {problem}"));
        }

        for (locale, fallbacks) in &config.i18n.fallbacks {
            if let Err(problem) = validate_locale(locale) {
                problems.push(format!("i18n.fallbacks: {problem}"));
            }
            for fallback in fallbacks {
                if let Err(problem) = validate_locale(fallback) {
                    problems.push(format!("i18n.fallbacks.{locale}: {problem}"));
                }
            }
        }

        for (index, backend) in config.backends.iter().enumerate() {
            if let Err(problem) = validate_backend(backend) {
                problems.push(format!("backends[{index}] ({}): {problem}", backend.kind()));
            }
        }

        if config.logging.level.trim().is_empty() {
            problems.push("logging.level: must not be empty".to_string());
        }

        problems
    }
}

/// Check that `locale` is a well-formed language identifier such as `en-US`.
pub fn validate_locale(locale: &str) -> Result<(), String> {
    if locale.is_empty() {
        return Err("locale must not be empty".to_string());
    }
    if locale.contains('/') {
        return Err(format!("locale '{locale}' must not contain '/'"));
    }
    locale
        .parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|e| format!("invalid locale '{locale}': {e}"))
}

/// Check a single backend entry.
pub fn validate_backend(backend: &BackendConfig) -> Result<(), String> {
    match backend {
        BackendConfig::File { path } if path.as_os_str().is_empty() => {
            Err("path must not be empty".to_string())
        }
        BackendConfig::Yaml { paths, .. } if paths.is_empty() => {
            Err("at least one path is required".to_string())
        }
        BackendConfig::Yaml { paths, .. } if paths.iter().any(|p| p.as_os_str().is_empty()) => {
            Err("paths must not be empty".to_string())
        }
        BackendConfig::Memory { name: Some(name), .. } if name.trim().is_empty() => {
            Err("name must not be blank".to_string())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_locale() {
        assert!(validate_locale("en-US").is_ok());
        assert!(validate_locale("zh-Hant-TW").is_ok());
        assert!(validate_locale("de").is_ok());

        assert!(validate_locale("").is_err());
        assert!(validate_locale("en/US").is_err());
        assert!(validate_locale("not a locale").is_err());
    }

    #[test]
    fn test_validate_backend() {
        assert!(validate_backend(&BackendConfig::File {
            path: PathBuf::from("translations.json")
        })
        .is_ok());
        assert!(validate_backend(&BackendConfig::File {
            path: PathBuf::new()
        })
        .is_err());
        assert!(validate_backend(&BackendConfig::Yaml {
            paths: Vec::new(),
            recursive: false
        })
        .is_err());
        assert!(validate_backend(&BackendConfig::Memory {
            name: Some("  ".to_string()),
            read_only: false
        })
        .is_err());
        assert!(validate_backend(&BackendConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut config = Config::default();
        assert!(ConfigValidator::validate(&config).is_empty());

        config.i18n.default_locale = "???".to_string();
        config
            .i18n
            .fallbacks
            .insert("en-GB".to_string(), vec!["bad locale".to_string()]);
        config.backends.push(BackendConfig::Yaml {
            paths: Vec::new(),
            recursive: true,
        });

        let problems = ConfigValidator::validate(&config);
        assert_eq!(problems.len(), 3, "{problems:?}");
        assert!(problems[0].starts_with("i18n.default_locale"));
        assert!(problems[1].starts_with("i18n.fallbacks.en-GB"));
        assert!(problems[2].starts_with("backends[1] (yaml)"));
    }
}
