//! Integration tests for loading and saving catalogs and configuration.

use std::fs;
use std::io::Write;

use phrasebook::{Engine, EngineConfig, LoadError, Node, ObjectNotation, Tree};
use tempfile::{NamedTempFile, tempdir};

// =========================================================================
// Loading from Strings
// =========================================================================

#[test]
fn load_locale_str_counts_top_level_entries() {
    let mut engine = Engine::new();
    let count = engine
        .load_locale_str("en", r#"{ "a": "A", "b": { "c": "C" }, "d": { "one": "1", "other": "n" } }"#)
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(engine.locales(), vec!["en".to_string()]);
}

#[test]
fn load_locale_str_replaces_previous_tree() {
    let mut engine = Engine::new();
    engine.load_locale_str("en", r#"{ "a": "A" }"#).unwrap();
    engine.load_locale_str("en", r#"{ "b": "B" }"#).unwrap();
    let tree = engine.catalog(Some("en")).unwrap();
    assert!(!tree.contains_key("a"));
    assert!(tree.contains_key("b"));
}

#[test]
fn load_locale_str_reports_syntax_position() {
    let mut engine = Engine::new();
    let err = engine.load_locale_str("en", "{\n  \"a\": \"A\",\n  oops\n}").unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
    assert_eq!(err.json_position().map(|(line, _)| line), Some(3));
}

#[test]
fn load_locale_str_rejects_non_object() {
    let mut engine = Engine::new();
    let err = engine.load_locale_str("en", r#"["a", "b"]"#).unwrap_err();
    assert!(matches!(err, LoadError::NotAnObject { .. }));
    assert!(engine.locales().is_empty());
}

#[test]
fn load_locale_str_rejects_non_text_leaves() {
    let mut engine = Engine::new();
    let err = engine.load_locale_str("en", r#"{ "a": 1 }"#).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
}

#[test]
fn string_loaded_locale_cannot_be_reloaded() {
    let mut engine = Engine::new();
    engine.load_locale_str("en", "{}").unwrap();
    let err = engine.reload_locale("en").unwrap_err();
    assert!(matches!(err, LoadError::NoPathForLocale { .. }));
    assert!(matches!(engine.save_locale("en"), Err(LoadError::NoPathForLocale { .. })));
}

// =========================================================================
// Loading from Files
// =========================================================================

#[test]
fn load_locale_file_and_reload() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "Hello": "Hallo" }}"#).unwrap();

    let mut engine = Engine::new();
    engine.load_locale_file("de", file.path()).unwrap();
    engine.set_locale("de");
    assert_eq!(engine.t("Hello"), "Hallo");
    assert_eq!(engine.locale_path("de"), Some(file.path()));

    fs::write(file.path(), r#"{ "Hello": "Servus" }"#).unwrap();
    engine.reload_locale("de").unwrap();
    assert_eq!(engine.t("Hello"), "Servus");
}

#[test]
fn load_locale_file_missing_is_io_error() {
    let dir = tempdir().unwrap();
    let mut engine = Engine::new();
    let err = engine
        .load_locale_file("en", dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn load_catalog_dir_uses_file_stems() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("en.json"), r#"{ "Hello": "Hello" }"#).unwrap();
    fs::write(dir.path().join("de.json"), r#"{ "Hello": "Hallo" }"#).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let mut engine = Engine::new();
    let locales = engine.load_catalog_dir(dir.path()).unwrap();
    assert_eq!(locales, vec!["de".to_string(), "en".to_string()]);
    assert_eq!(engine.translate_all("Hello"), vec!["Hallo", "Hello"]);
}

#[test]
fn save_locale_writes_seeded_phrases() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.json");
    fs::write(&path, r#"{ "Hello": "Hello" }"#).unwrap();

    let mut engine = Engine::new();
    engine.set_object_notation(Some("."));
    engine.load_locale_file("en", &path).unwrap();
    engine.t("menu.open:Open");

    assert_eq!(engine.save_locale("en").unwrap(), path);
    let saved: Tree = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let expected: Tree = serde_json::from_str(r#"{ "Hello": "Hello", "menu": { "open": "Open" } }"#).unwrap();
    assert_eq!(saved, expected);
}

#[test]
fn add_locale_forgets_file_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.json");
    fs::write(&path, "{}").unwrap();

    let mut engine = Engine::new();
    engine.load_locale_file("en", &path).unwrap();
    engine.add_locale("en", Tree::new());
    assert_eq!(engine.locale_path("en"), None);
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn config_from_json_applies_all_fields() {
    let config = EngineConfig::from_json_str(
        r#"{
            "locales": { "en": {}, "de": { "Hello": "Hallo" } },
            "defaultLocale": "de",
            "objectNotation": "->",
            "fallbacks": { "de-CH": "de" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.object_notation, Some(ObjectNotation::Separator("->".to_string())));

    let mut engine = Engine::from_config(config);
    assert_eq!(engine.locale(), "de");
    assert_eq!(engine.object_notation(), Some("->"));
    assert_eq!(engine.resolve_locale(Some("de-CH")), "de");
    assert_eq!(engine.t("Hello"), "Hallo");
}

#[test]
fn configure_keeps_absent_fields() {
    let mut engine = Engine::new();
    engine.add_locale("en", Tree::new());
    engine.configure(EngineConfig::builder().object_notation(true).build());

    assert_eq!(engine.object_notation(), Some("."));
    assert_eq!(engine.locale(), "en");
    assert_eq!(engine.locales(), vec!["en".to_string()]);
}

#[test]
fn object_notation_false_disables_nesting() {
    let mut engine = Engine::builder().object_notation(".".to_string()).build();
    engine.configure(EngineConfig::from_json_str(r#"{ "objectNotation": false }"#).unwrap());
    assert_eq!(engine.object_notation(), None);
}

#[test]
fn configured_locales_replace_catalog() {
    let mut engine = Engine::new();
    engine.add_locale("fr", Tree::new());
    let config = EngineConfig::builder()
        .locales([("en".to_string(), Tree::from([("a".to_string(), Node::from("A"))]))].into())
        .build();
    engine.configure(config);
    assert_eq!(engine.locales(), vec!["en".to_string()]);
}

#[test]
fn config_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "defaultLocale": "fr" }}"#).unwrap();
    let config = EngineConfig::from_path(file.path()).unwrap();
    assert_eq!(config.default_locale.as_deref(), Some("fr"));
    assert_eq!(config.locales, None);
}

#[test]
fn config_rejects_unknown_shape() {
    let err = EngineConfig::from_json_str(r#"{ "fallbacks": ["en"] }"#).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
}
