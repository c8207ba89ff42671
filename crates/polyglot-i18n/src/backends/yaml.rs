//! Read-only backend over a tree of YAML locale files
//!
//! Each file maps locales to nested key mappings:
//!
//! ```yaml
//! en:
//!   hello: Hello
//!   user:
//!     name: User Name
//! ```
//!
//! Nested keys are flattened with `.`, so the file above yields `hello` and
//! `user.name` for locale `en`.

use crate::backend::Backend;
use crate::error::{I18nError, I18nResult};
use crate::translation::{Translation, SCOPE_SEPARATOR};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Backend reading `*.yml` and `*.yaml` files on every load
#[derive(Debug, Clone)]
pub struct YamlBackend {
    name: String,
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl YamlBackend {
    /// Read the given files, and the YAML files directly inside the given directories
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let roots: Vec<String> = paths.iter().map(|path| path.display().to_string()).collect();
        Self {
            name: format!("yaml:{}", roots.join(",")),
            paths,
            recursive: false,
        }
    }

    /// Replace the name derived from the configured roots
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Like [`YamlBackend::new`], descending into subdirectories
    pub fn walk<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            recursive: true,
            ..Self::new(paths)
        }
    }

    /// Configured roots
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Every YAML file below the configured roots, sorted
    pub fn files(&self) -> I18nResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                self.collect_dir(path, &mut files)?;
            } else if path.is_file() {
                files.push(path.clone());
            } else {
                warn!("Translation path does not exist: {:?}", path);
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn collect_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) -> I18nResult<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                if self.recursive {
                    self.collect_dir(&path, files)?;
                }
            } else if is_yaml(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    fn load_file(path: &Path) -> I18nResult<Vec<Translation>> {
        debug!("Loading translation file: {:?}", path);

        let load_error = |message: String| I18nError::ResourceLoadError {
            path: path.to_string_lossy().to_string(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let document: Value =
            serde_yaml::from_str(&content).map_err(|e| load_error(e.to_string()))?;

        let mut translations = Vec::new();
        match document {
            Value::Null => {}
            Value::Mapping(locales) => {
                for (locale, tree) in locales {
                    let locale = scalar_to_string(&locale)
                        .ok_or_else(|| load_error("locale must be a scalar".to_string()))?;
                    flatten(&locale, None, &tree, &mut translations);
                }
            }
            _ => return Err(load_error("top level must map locales to keys".to_string())),
        }
        Ok(translations)
    }
}

impl Backend for YamlBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_translations(&self) -> I18nResult<Vec<Translation>> {
        let mut translations = Vec::new();
        for file in self.files()? {
            translations.extend(Self::load_file(&file)?);
        }
        Ok(translations)
    }

    fn save_translation(&self, _translation: &Translation) -> I18nResult<()> {
        Err(I18nError::backend(self.name(), "YAML files are read-only"))
    }

    fn delete_translation(&self, _translation: &Translation) -> I18nResult<()> {
        Err(I18nError::backend(self.name(), "YAML files are read-only"))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml" | "yaml")
    )
}

fn flatten(locale: &str, prefix: Option<&str>, node: &Value, out: &mut Vec<Translation>) {
    match node {
        Value::Mapping(children) => {
            for (name, child) in children {
                let Some(name) = scalar_to_string(name) else {
                    warn!("Skipping non-scalar key below {:?} in locale {}", prefix, locale);
                    continue;
                };
                let key = match prefix {
                    Some(prefix) => format!("{prefix}{SCOPE_SEPARATOR}{name}"),
                    None => name,
                };
                flatten(locale, Some(&key), child, out);
            }
        }
        Value::Tagged(tagged) => flatten(locale, prefix, &tagged.value, out),
        leaf => {
            let (Some(key), Some(value)) = (prefix, scalar_to_string(leaf)) else {
                warn!("Skipping unsupported value below {:?} in locale {}", prefix, locale);
                return;
            };
            out.push(Translation::new(locale, key, value));
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_common::test_utils::{create_temp_dir, locale_fixtures, write_fixture};

    fn sorted(mut translations: Vec<Translation>) -> Vec<(String, String, String)> {
        translations.sort_by(|a, b| (&a.locale, &a.key).cmp(&(&b.locale, &b.key)));
        translations
            .into_iter()
            .map(|t| (t.locale, t.key, t.value))
            .collect()
    }

    #[test]
    fn test_flattens_nested_keys() {
        let dir = create_temp_dir();
        write_fixture(dir.path(), "en.yml", locale_fixtures::english_yaml());

        let loaded = sorted(YamlBackend::new([dir.path()]).load_translations().unwrap());
        assert_eq!(
            loaded,
            vec![
                ("en".into(), "hello".into(), "Hello".into()),
                ("en".into(), "user.email".into(), "Email".into()),
                ("en".into(), "user.name".into(), "User Name".into()),
            ]
        );
    }

    #[test]
    fn test_new_ignores_subdirectories_and_walk_descends() {
        let dir = create_temp_dir();
        write_fixture(dir.path(), "en.yml", locale_fixtures::english_yaml());
        write_fixture(dir.path(), "de.yaml", locale_fixtures::german_yaml());
        write_fixture(dir.path(), "asia/zh.yml", locale_fixtures::chinese_yaml());
        write_fixture(dir.path(), "notes.txt", "not yaml");

        let flat = YamlBackend::new([dir.path()]).load_translations().unwrap();
        assert_eq!(flat.len(), 6);

        let deep = sorted(YamlBackend::walk([dir.path()]).load_translations().unwrap());
        let mut expected: Vec<(String, String, String)> = locale_fixtures::expected_translations()
            .into_iter()
            .map(|(l, k, v)| (l.to_string(), k.to_string(), v.to_string()))
            .collect();
        expected.sort();
        assert_eq!(deep, expected);
    }

    #[test]
    fn test_scalars_are_stringified() {
        let dir = create_temp_dir();
        let file = write_fixture(
            dir.path(),
            "misc.yml",
            "en:\n  count: 3\n  enabled: true\n  blank:\n  list: [a, b]\n",
        );

        let loaded = sorted(YamlBackend::new([file]).load_translations().unwrap());
        assert_eq!(
            loaded,
            vec![
                ("en".into(), "blank".into(), String::new()),
                ("en".into(), "count".into(), "3".into()),
                ("en".into(), "enabled".into(), "true".into()),
            ]
        );
    }

    #[test]
    fn test_files_are_reread_on_each_load() {
        let dir = create_temp_dir();
        write_fixture(dir.path(), "en.yml", "en:\n  hello: Hello\n");
        let backend = YamlBackend::new([dir.path()]);
        assert_eq!(backend.load_translations().unwrap()[0].value, "Hello");

        write_fixture(dir.path(), "en.yml", "en:\n  hello: Hi\n");
        assert_eq!(backend.load_translations().unwrap()[0].value, "Hi");
    }

    #[test]
    fn test_invalid_yaml_fails_the_load() {
        let dir = create_temp_dir();
        write_fixture(dir.path(), "broken.yml", "en: [unclosed\n");
        let result = YamlBackend::new([dir.path()]).load_translations();
        assert!(matches!(result, Err(I18nError::ResourceLoadError { .. })));
    }

    #[test]
    fn test_name_lists_roots() {
        let backend = YamlBackend::walk(["locales", "extra/en.yml"]);
        assert_eq!(backend.name(), "yaml:locales,extra/en.yml");
        assert_eq!(backend.named("bundled").name(), "bundled");
    }

    #[test]
    fn test_writes_are_rejected() {
        let backend = YamlBackend::new(Vec::<PathBuf>::new());
        let translation = Translation::new("en", "hello", "Hello");
        assert!(backend.save_translation(&translation).is_err());
        assert!(backend.delete_translation(&translation).is_err());
        assert!(backend.load_translations().unwrap().is_empty());
    }
}
