//! Engine wiring and command execution

use crate::cli::{Command, TableFormat};
use crate::error::{AppError, AppResult};
use polyglot_config::{BackendConfig, Config};
use polyglot_i18n::translation::scoped_key;
use polyglot_i18n::{
    Backend, Engine, FileBackend, FluentArgs, FluentValue, I18nError, KeyQuery, MemoryBackend,
    Page, Translation, TranslationTable, YamlBackend,
};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// A configured engine ready to run commands
#[derive(Debug)]
pub struct App {
    config: Config,
    engine: Engine,
}

impl App {
    /// Build the engine described by `config`, loading every backend
    pub fn new(config: Config) -> AppResult<Self> {
        let engine = Self::build_engine(&config)?;
        Ok(Self { config, engine })
    }

    /// Build an engine from the `i18n` and `backends` sections
    pub fn build_engine(config: &Config) -> AppResult<Engine> {
        let mut builder = Engine::builder()
            .default_locale(config.i18n.default_locale.as_str())
            .backends(config.backends.iter().map(Self::backend));

        for (locale, fallbacks) in &config.i18n.fallbacks {
            builder = builder.fallback(locale.as_str(), fallbacks.iter().map(String::as_str));
        }

        Ok(builder.build()?)
    }

    /// Instantiate one configured backend
    pub fn backend(config: &BackendConfig) -> Arc<dyn Backend> {
        debug!("Creating {} backend", config.kind());
        match config {
            BackendConfig::File { path } => Arc::new(FileBackend::new(path)),
            BackendConfig::Yaml { paths, recursive } => {
                if *recursive {
                    Arc::new(YamlBackend::walk(paths.iter()))
                } else {
                    Arc::new(YamlBackend::new(paths.iter()))
                }
            }
            BackendConfig::Memory { name, read_only } => {
                let backend = name
                    .as_deref()
                    .map_or_else(MemoryBackend::new, MemoryBackend::named);
                if *read_only {
                    Arc::new(backend.read_only())
                } else {
                    Arc::new(backend)
                }
            }
        }
    }

    /// The loaded configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The engine commands run against
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run `command`, writing its output to `out`
    pub fn run<W: Write>(&self, command: &Command, out: &mut W) -> AppResult<()> {
        match command {
            Command::Lookup {
                locale,
                key,
                scope,
                default,
                fallbacks,
                args,
                raw,
            } => {
                if *raw {
                    let key = scoped_key(scope.as_deref(), key);
                    let value = self
                        .engine
                        .lookup(locale, &key, true)
                        .ok_or_else(|| I18nError::NotFound {
                            key: key.to_string(),
                        })?;
                    writeln!(out, "{value}")?;
                    return Ok(());
                }

                let mut view = self.engine.fallbacks(fallbacks.iter().map(String::as_str));
                if let Some(scope) = scope {
                    view = view.scope(scope.as_str());
                }
                if let Some(default) = default {
                    view = view.default(default.as_str());
                }

                let args = fluent_args(args);
                writeln!(out, "{}", view.translate(locale, key, args.as_ref()))?;
            }

            Command::Keys {
                locale,
                editing,
                keyword,
                page,
                per_page,
                all,
            } => {
                let mut query = KeyQuery::new(locale.as_deref().unwrap_or_default())
                    .per_page(*per_page)
                    .page(if *all { Page::All } else { Page::Number(*page) });
                if let Some(editing) = editing {
                    query = query.editing(editing.as_str());
                }
                if let Some(keyword) = keyword {
                    query = query.keyword(keyword.as_str());
                }

                let result = self.engine.search_keys(&query)?;
                for key in &result.keys {
                    writeln!(out, "{key}")?;
                }
                if let Some(page) = result
                    .page
                    .filter(|_| result.pages > 1 && !result.keys.is_empty())
                {
                    writeln!(
                        out,
                        "-- page {page} of {}, {} keys",
                        result.pages, result.total
                    )?;
                }
            }

            Command::Locales => {
                for locale in self.engine.locales()? {
                    writeln!(out, "{locale}")?;
                }
            }

            Command::Set { locale, key, value } => {
                let translation = Translation::new(locale.as_str(), key.as_str(), value.as_str());
                self.engine.save_translation(&translation)?;
                let backend = self
                    .engine
                    .cached(locale, key)
                    .and_then(|saved| saved.backend)
                    .unwrap_or_default();
                writeln!(out, "saved {locale}/{key} to {backend}")?;
            }

            Command::Delete { locale, key } => {
                self.engine
                    .delete_translation(&Translation::new(locale.as_str(), key.as_str(), ""))?;
                writeln!(out, "deleted {locale}/{key}")?;
            }

            Command::Export { output, format } => {
                let format = format
                    .or_else(|| output.as_deref().map(TableFormat::from_path))
                    .unwrap_or_default();
                let table = self.engine.export_table()?;
                let document = write_table(&table, format)?;

                match output {
                    Some(path) => {
                        fs::write(path, document)?;
                        info!("Exported {} keys to {:?}", table.rows.len(), path);
                    }
                    None => out.write_all(document.as_bytes())?,
                }
            }

            Command::Import { input, format } => {
                let format = format.unwrap_or_else(|| TableFormat::from_path(input));
                let table = read_table(input, format)?;
                let summary = self.engine.import_table(&table);
                writeln!(
                    out,
                    "saved {}, deleted {}, failed {}",
                    summary.saved, summary.deleted, summary.failed
                )?;
            }
        }

        Ok(())
    }
}

/// Numeric values become Fluent numbers so that plural selectors match
fn fluent_args(raw: &[(String, String)]) -> Option<FluentArgs<'static>> {
    if raw.is_empty() {
        return None;
    }

    let mut args = FluentArgs::new();
    for (name, value) in raw {
        match value.parse::<f64>() {
            Ok(number) => args.set(name.clone(), FluentValue::from(number)),
            Err(_) => args.set(name.clone(), value.clone()),
        }
    }
    Some(args)
}

fn write_table(table: &TranslationTable, format: TableFormat) -> AppResult<String> {
    match format {
        TableFormat::Yaml => serde_yaml::to_string(table).map_err(|e| AppError::Table(e.to_string())),
        TableFormat::Json => serde_json::to_string_pretty(table)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| AppError::Table(e.to_string())),
    }
}

fn read_table(path: &Path, format: TableFormat) -> AppResult<TranslationTable> {
    let content = fs::read_to_string(path)?;
    let table = match format {
        TableFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| AppError::Table(e.to_string())),
        TableFormat::Json => serde_json::from_str(&content).map_err(|e| AppError::Table(e.to_string())),
    }?;
    Ok(table)
}
