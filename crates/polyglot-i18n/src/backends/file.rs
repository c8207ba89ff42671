//! Writable backend persisting translations to a single JSON document

use crate::backend::Backend;
use crate::error::{I18nError, I18nResult};
use crate::translation::Translation;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// `locale -> key -> value`, kept ordered so rewritten files diff cleanly
type Document = BTreeMap<String, BTreeMap<String, String>>;

/// Backend storing `{ "locale": { "key": "value" } }` in a JSON file.
///
/// Every write reads the current document, applies the change and replaces
/// the file atomically. A missing file is an empty document.
#[derive(Debug)]
pub struct FileBackend {
    name: String,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Use the document at `path`; the file is created on the first save.
    ///
    /// The backend is named `file:<path>`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path.display()),
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the path-derived name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Location of the JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> I18nResult<Document> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(self.unavailable(e)),
        };

        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&content).map_err(|e| I18nError::ResourceLoadError {
            path: self.path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    }

    fn write_document(&self, document: &Document) -> I18nResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.unavailable(e))?;

        let mut file = NamedTempFile::new_in(dir).map_err(|e| self.unavailable(e))?;
        serde_json::to_writer_pretty(&mut file, document).map_err(|e| self.unavailable(e))?;
        file.write_all(b"\n").map_err(|e| self.unavailable(e))?;
        file.persist(&self.path)
            .map_err(|e| self.unavailable(e.error))?;
        Ok(())
    }

    /// Apply `change` to the document and write it back under the write lock
    fn update(&self, change: impl FnOnce(&mut Document)) -> I18nResult<()> {
        let _guard = self.write_lock.lock();
        let mut document = self.read_document()?;
        change(&mut document);
        self.write_document(&document)
    }

    fn unavailable(&self, error: impl std::fmt::Display) -> I18nError {
        I18nError::backend(
            self.name(),
            format!("{}: {}", self.path.display(), error),
        )
    }
}

impl Backend for FileBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_translations(&self) -> I18nResult<Vec<Translation>> {
        let document = self.read_document()?;
        let translations: Vec<Translation> = document
            .into_iter()
            .flat_map(|(locale, entries)| {
                entries
                    .into_iter()
                    .map(move |(key, value)| Translation::new(locale.clone(), key, value))
            })
            .collect();
        debug!("Read {} translations from {:?}", translations.len(), self.path);
        Ok(translations)
    }

    fn save_translation(&self, translation: &Translation) -> I18nResult<()> {
        self.update(|document| {
            document
                .entry(translation.locale.clone())
                .or_default()
                .insert(translation.key.clone(), translation.value.clone());
        })
    }

    fn delete_translation(&self, translation: &Translation) -> I18nResult<()> {
        let _guard = self.write_lock.lock();
        let mut document = self.read_document()?;

        let Some(entries) = document.get_mut(&translation.locale) else {
            return Ok(());
        };
        if entries.remove(&translation.key).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            document.remove(&translation.locale);
        }
        self.write_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_common::test_utils::{create_temp_dir, write_fixture};

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = create_temp_dir();
        let backend = FileBackend::new(dir.path().join("missing.json"));
        assert!(backend.load_translations().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = create_temp_dir();
        let path = dir.path().join("nested/translations.json");

        let backend = FileBackend::new(&path);
        backend
            .save_translation(&Translation::new("en", "hello", "Hello"))
            .unwrap();
        backend
            .save_translation(&Translation::new("de", "hello", "Hallo"))
            .unwrap();
        backend
            .save_translation(&Translation::new("en", "hello", "Hi"))
            .unwrap();

        let reopened = FileBackend::new(&path);
        let loaded = reopened.load_translations().unwrap();
        assert_eq!(
            loaded,
            vec![
                Translation::new("de", "hello", "Hallo"),
                Translation::new("en", "hello", "Hi"),
            ]
        );

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["en"]["hello"], "Hi");
    }

    #[test]
    fn test_delete_removes_entry_and_empty_locale() {
        let dir = create_temp_dir();
        let path = write_fixture(
            dir.path(),
            "translations.json",
            r#"{"en": {"hello": "Hello", "bye": "Bye"}, "fr": {"hello": "Bonjour"}}"#,
        );
        let backend = FileBackend::new(&path);

        backend
            .delete_translation(&Translation::new("fr", "hello", ""))
            .unwrap();
        backend
            .delete_translation(&Translation::new("en", "bye", ""))
            .unwrap();
        // unknown entries are a no-op
        backend
            .delete_translation(&Translation::new("it", "hello", ""))
            .unwrap();

        assert_eq!(
            backend.load_translations().unwrap(),
            vec![Translation::new("en", "hello", "Hello")]
        );
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("fr").is_none());
    }

    #[test]
    fn test_name_follows_path_unless_overridden() {
        let backend = FileBackend::new("/srv/a.json");
        assert_eq!(backend.name(), "file:/srv/a.json");
        assert_ne!(backend.name(), FileBackend::new("/srv/b.json").name());
        assert_eq!(backend.named("primary").name(), "primary");
    }

    #[test]
    fn test_malformed_document_fails_load() {
        let dir = create_temp_dir();
        let path = write_fixture(dir.path(), "translations.json", "{ not json");
        let result = FileBackend::new(path).load_translations();
        assert!(matches!(result, Err(I18nError::ResourceLoadError { .. })));
    }
}
