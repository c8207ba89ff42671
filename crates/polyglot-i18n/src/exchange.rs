//! Whole-table export and import

use crate::engine::Engine;
use crate::error::I18nResult;
use crate::translation::Translation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Every translation as a grid of keys by locales.
///
/// Serializes to YAML or JSON as
///
/// ```yaml
/// locales: [de-DE, en-US]
/// rows:
///   hello:
///     de-DE: Hallo
///     en-US: Hello
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationTable {
    /// Column order
    pub locales: Vec<String>,
    /// `key -> locale -> value`; an empty value marks a missing cell
    pub rows: BTreeMap<String, BTreeMap<String, String>>,
}

/// Outcome of [`Engine::import_table`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Cells written to a backend
    pub saved: usize,
    /// Empty cells whose translation was deleted
    pub deleted: usize,
    /// Cells whose save or delete failed
    pub failed: usize,
}

impl Engine {
    /// Export every cached translation
    pub fn export_table(&self) -> I18nResult<TranslationTable> {
        let locales = self.locales()?;
        let mut rows: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for translation in self.translations()? {
            rows.entry(translation.key)
                .or_default()
                .insert(translation.locale, translation.value);
        }
        for cells in rows.values_mut() {
            for locale in &locales {
                cells.entry(locale.clone()).or_default();
            }
        }

        Ok(TranslationTable { locales, rows })
    }

    /// Apply a table: empty cells delete, others save.
    ///
    /// Cells failing to save or delete are counted and logged; they do not
    /// stop the import.
    pub fn import_table(&self, table: &TranslationTable) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for (key, cells) in &table.rows {
            for (locale, value) in cells {
                let translation = Translation::new(locale.as_str(), key.as_str(), value.as_str());
                let (result, counter) = if value.is_empty() {
                    (self.delete_translation(&translation), &mut summary.deleted)
                } else {
                    (self.save_translation(&translation), &mut summary.saved)
                };

                match result {
                    Ok(()) => *counter += 1,
                    Err(err) => {
                        warn!("Failed to import {}/{}: {}", locale, key, err);
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(
            "Imported translations: {} saved, {} deleted, {} failed",
            summary.saved, summary.deleted, summary.failed
        );
        summary
    }
}
