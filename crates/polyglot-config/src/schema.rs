//! Configuration schema definitions using serde.

use polyglot_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure for Polyglot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale settings.
    pub i18n: I18nConfig,
    /// Translation backends in priority order; the first is the primary write target.
    pub backends: Vec<BackendConfig>,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Locale settings of the translation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale consulted last and used for discovered keys.
    pub default_locale: String,
    /// Fallback locales consulted, in order, when a locale misses.
    pub fallbacks: BTreeMap<String, Vec<String>>,
}

/// One translation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Writable JSON document.
    File {
        /// Location of the document.
        path: PathBuf,
    },
    /// Read-only YAML locale files.
    Yaml {
        /// Files or directories to read.
        paths: Vec<PathBuf>,
        /// Whether directories are searched recursively.
        #[serde(default)]
        recursive: bool,
    },
    /// In-process map, lost on exit.
    Memory {
        /// Backend name, `memory` when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Reject saves and deletes.
        #[serde(default)]
        read_only: bool,
    },
}

impl BackendConfig {
    /// Short name of the backend kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::Yaml { .. } => "yaml",
            Self::Memory { .. } => "memory",
        }
    }

    /// Resolve relative paths against `base`.
    #[must_use]
    pub fn relative_to(self, base: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };

        match self {
            Self::File { path } => Self::File {
                path: resolve(path),
            },
            Self::Yaml { paths, recursive } => Self::Yaml {
                paths: paths.into_iter().map(resolve).collect(),
                recursive,
            },
            memory @ Self::Memory { .. } => memory,
        }
    }
}

impl Config {
    /// Resolve every relative backend path against `base`, usually the
    /// directory holding the configuration file.
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.backends = self
            .backends
            .into_iter()
            .map(|backend| backend.relative_to(base))
            .collect();
        self
    }
}
