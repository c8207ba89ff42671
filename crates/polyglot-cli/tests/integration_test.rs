//! Integration tests for the polyglot command line.
//!
//! These tests build the application from configuration files on disk and
//! run commands against the resulting engine.

use clap::Parser;
use polyglot_cli::{App, AppError, Cli, Command};
use polyglot_common::test_utils::{create_temp_dir, init_test_logging, locale_fixtures, write_fixture};
use polyglot_config::ConfigLoader;
use std::fs;
use std::path::Path;

const CONFIG: &str = "\
i18n:
  default_locale: en
  fallbacks:
    de-AT: [de]
backends:
  - type: file
    path: translations.json
  - type: yaml
    paths: [locales]
    recursive: true
";

fn app_in(dir: &Path) -> App {
    let path = write_fixture(dir, "polyglot.yaml", CONFIG);
    let config = ConfigLoader::load_from_file(path).expect("config loads");
    App::new(config).expect("app builds")
}

fn run(app: &App, args: &[&str]) -> Result<String, AppError> {
    let mut argv = vec!["polyglot"];
    argv.extend_from_slice(args);
    let cli = Cli::parse_from(argv);

    let mut out = Vec::new();
    app.run(&cli.command, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

fn setup() -> tempfile::TempDir {
    init_test_logging();
    let dir = create_temp_dir();
    write_fixture(dir.path(), "locales/en.yml", locale_fixtures::english_yaml());
    write_fixture(dir.path(), "locales/de.yml", locale_fixtures::german_yaml());
    write_fixture(dir.path(), "locales/asia/zh.yml", locale_fixtures::chinese_yaml());
    dir
}

#[test]
fn test_lookup_uses_configured_fallbacks() {
    let dir = setup();
    let app = app_in(dir.path());

    assert_eq!(run(&app, &["lookup", "de-AT", "hello"]).unwrap(), "Hallo\n");
    assert_eq!(run(&app, &["lookup", "fr", "user.name"]).unwrap(), "User Name\n");
    assert_eq!(
        run(&app, &["lookup", "zh-CN", "email", "--scope", "user"]).unwrap(),
        "邮箱\n"
    );
}

#[test]
fn test_discovered_keys_survive_restart() {
    let dir = setup();
    let app = app_in(dir.path());

    let output = run(&app, &["lookup", "de", "welcome", "--default", "Welcome, { $name }!", "--arg", "name=Ada"]).unwrap();
    assert_eq!(output, "Welcome, Ada!\n");

    let stored = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    assert!(stored.contains("Welcome, { $name }!"));

    let restarted = app_in(dir.path());
    assert_eq!(
        run(&restarted, &["lookup", "en", "welcome", "--raw"]).unwrap(),
        "Welcome, { $name }!\n"
    );
}

#[test]
fn test_set_delete_and_locales() {
    let dir = setup();
    let app = app_in(dir.path());

    assert_eq!(
        run(&app, &["set", "fr", "hello", "Bonjour"]).unwrap(),
        "saved fr/hello to file\n"
    );
    assert_eq!(run(&app, &["locales"]).unwrap(), "de\nen\nfr\nzh-CN\n");

    assert_eq!(run(&app, &["delete", "fr", "hello"]).unwrap(), "deleted fr/hello\n");
    assert_eq!(run(&app, &["locales"]).unwrap(), "de\nen\nzh-CN\n");

    // YAML entries belong to a read-only backend
    let err = run(&app, &["delete", "en", "hello"]).unwrap_err();
    assert!(matches!(err, AppError::I18n(_)));
}

#[test]
fn test_keys_search() {
    let dir = setup();
    let app = app_in(dir.path());

    assert_eq!(run(&app, &["keys"]).unwrap(), "hello\nuser.email\nuser.name\n");
    assert_eq!(
        run(&app, &["keys", "de", "--keyword", "BENUTZER"]).unwrap(),
        "user.name\n"
    );
    assert_eq!(
        run(&app, &["keys", "--per-page", "2"]).unwrap(),
        "hello\nuser.email\n-- page 1 of 2, 3 keys\n"
    );
    assert_eq!(run(&app, &["keys", "--per-page", "2", "--page", "3"]).unwrap(), "");
}

#[test]
fn test_export_then_import() {
    let dir = setup();
    let app = app_in(dir.path());

    let exported = dir.path().join("table.json");
    run(&app, &["export", "--output", exported.to_str().unwrap()]).unwrap();
    let table: serde_json::Value = serde_json::from_str(&fs::read_to_string(&exported).unwrap()).unwrap();
    assert_eq!(table["rows"]["hello"]["de"], "Hallo");
    assert_eq!(table["locales"], serde_json::json!(["de", "en", "zh-CN"]));

    let edits = write_fixture(
        dir.path(),
        "edits.yaml",
        "locales: [fr]\nrows:\n  hello:\n    fr: Bonjour\n  user.name:\n    fr: Nom\n",
    );
    assert_eq!(
        run(&app, &["import", edits.to_str().unwrap()]).unwrap(),
        "saved 2, deleted 0, failed 0\n"
    );
    assert_eq!(run(&app, &["lookup", "fr", "user.name"]).unwrap(), "Nom\n");

    let yaml = run(&app, &["export"]).unwrap();
    assert!(yaml.contains("fr: Bonjour"));
}
