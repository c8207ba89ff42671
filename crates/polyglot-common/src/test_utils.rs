//! Test utilities and shared test helpers for Polyglot.
//!
//! This module provides common testing utilities and fixtures that can be
//! used across all crates in the workspace for unit and integration testing.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `content` to `relative` below `root`, creating parent directories.
pub fn write_fixture(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Locale file fixtures in the layout read by the YAML backend.
pub mod locale_fixtures {
    /// English translations.
    pub fn english_yaml() -> &'static str {
        r#"
en:
  hello: Hello
  user:
    name: User Name
    email: Email
"#
    }

    /// German translations.
    pub fn german_yaml() -> &'static str {
        r#"
de:
  hello: Hallo
  user:
    name: Benutzername
    email: E-Mail-Adresse
"#
    }

    /// Simplified Chinese translations, usually placed in a subdirectory.
    pub fn chinese_yaml() -> &'static str {
        r#"
zh-CN:
  hello: 你好
  user:
    name: 用户名
    email: 邮箱
"#
    }

    /// Every `(locale, key, value)` triple contained in the fixtures above.
    pub fn expected_translations() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("en", "hello", "Hello"),
            ("en", "user.name", "User Name"),
            ("en", "user.email", "Email"),
            ("de", "hello", "Hallo"),
            ("de", "user.name", "Benutzername"),
            ("de", "user.email", "E-Mail-Adresse"),
            ("zh-CN", "hello", "你好"),
            ("zh-CN", "user.name", "用户名"),
            ("zh-CN", "user.email", "邮箱"),
        ]
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
backends:
  - type: memory
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "i18n:\n",
            "  default_locale: \"en-US\"\n",
            "  fallbacks:\n",
            "    en-GB: [\"en-AU\"]\n",
            "    de-AT: [\"de-DE\", \"de\"]\n",
            "\n",
            "backends:\n",
            "  - type: file\n",
            "    path: \"translations.json\"\n",
            "  - type: yaml\n",
            "    paths: [\"locales\"]\n",
            "    recursive: true\n",
            "  - type: memory\n",
            "    name: \"scratch\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"compact\"\n"
        )
    }
}
