//! Command line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Resolve, inspect and edit translations
#[derive(Parser, Debug)]
#[command(name = "polyglot", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Serialization of exported and imported translation tables
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// YAML document
    #[default]
    Yaml,
    /// JSON document
    Json,
}

impl TableFormat {
    /// Guess the format from a file extension, YAML unless it is `.json`
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Translate a key, persisting it when it has never been seen
    Lookup {
        /// Requested locale; empty for the default locale
        locale: String,
        /// Translation key
        key: String,
        /// Scope prefixed to the key
        #[arg(long)]
        scope: Option<String>,
        /// Value stored when the key is discovered
        #[arg(long)]
        default: Option<String>,
        /// Extra fallback locale, may be repeated
        #[arg(long = "fallback")]
        fallbacks: Vec<String>,
        /// Argument as `name=value`, may be repeated
        #[arg(long = "arg", value_parser = parse_arg)]
        args: Vec<(String, String)>,
        /// Print the stored value only, without discovery or formatting
        #[arg(long)]
        raw: bool,
    },

    /// List translation keys
    Keys {
        /// Locale to list, the default locale when omitted
        locale: Option<String>,
        /// Also list keys of this locale
        #[arg(long)]
        editing: Option<String>,
        /// Case-insensitive filter on keys and values
        #[arg(short, long)]
        keyword: Option<String>,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Keys per page
        #[arg(long, default_value_t = polyglot_i18n::DEFAULT_PER_PAGE)]
        per_page: usize,
        /// Print every matching key
        #[arg(long, conflicts_with = "page")]
        all: bool,
    },

    /// List locales with at least one translation
    Locales,

    /// Save a translation into the first accepting backend
    Set {
        /// Locale of the translation
        locale: String,
        /// Translation key
        key: String,
        /// New value
        value: String,
    },

    /// Delete a translation from every backend
    Delete {
        /// Locale of the translation
        locale: String,
        /// Translation key
        key: String,
    },

    /// Write every translation as a table
    Export {
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Table format, guessed from the output file when omitted
        #[arg(short, long, value_enum)]
        format: Option<TableFormat>,
    },

    /// Apply a table: empty cells delete, other cells save
    Import {
        /// Table file
        input: PathBuf,
        /// Table format, guessed from the file when omitted
        #[arg(short, long, value_enum)]
        format: Option<TableFormat>,
    },
}

fn parse_arg(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::parse_from([
            "polyglot",
            "--config",
            "polyglot.yaml",
            "lookup",
            "en-AU",
            "name",
            "--scope",
            "user",
            "--fallback",
            "en-GB",
            "--arg",
            "count=3",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("polyglot.yaml")));
        match cli.command {
            Command::Lookup {
                locale,
                key,
                scope,
                fallbacks,
                args,
                raw,
                ..
            } => {
                assert_eq!(locale, "en-AU");
                assert_eq!(key, "name");
                assert_eq!(scope.as_deref(), Some("user"));
                assert_eq!(fallbacks, vec!["en-GB"]);
                assert_eq!(args, vec![("count".to_string(), "3".to_string())]);
                assert!(!raw);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_arg_is_rejected() {
        let result = Cli::try_parse_from(["polyglot", "lookup", "en", "k", "--arg", "novalue"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_keys_defaults() {
        let cli = Cli::parse_from(["polyglot", "keys"]);
        assert_eq!(
            cli.command,
            Command::Keys {
                locale: None,
                editing: None,
                keyword: None,
                page: 1,
                per_page: 25,
                all: false,
            }
        );
    }

    #[test]
    fn test_table_format_from_path() {
        assert_eq!(TableFormat::from_path("out.JSON".as_ref()), TableFormat::Json);
        assert_eq!(TableFormat::from_path("out.yml".as_ref()), TableFormat::Yaml);
        assert_eq!(TableFormat::from_path("out".as_ref()), TableFormat::Yaml);
    }
}
