//! Integration tests for loading configuration from fixture files.
//!
//! These tests exercise the public API end to end: declaring a schema,
//! loading it from the TOML fixtures under `tests/test-config/`, and
//! rendering the defaults document.

use std::path::PathBuf;
use std::sync::Arc;

use configurave::{Config, ConfigEntry, ConfigError, Schema, Source, ValueType};
use serde::Deserialize;

fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-config")
        .join(relative)
}

fn root_url_schema(path: PathBuf) -> Arc<Schema> {
    Schema::builder("TestConfig")
        .doc("The test configuration for configurave.")
        .source(Source::file(path))
        .entry(
            "root_url",
            ConfigEntry::string()
                .comment("The root url configuration for the application")
                .description(
                    "A long multiline description goes here about all the options \
                     you could potentially decide upon using.",
                ),
        )
        .build()
        .expect("schema should be valid")
}

#[test]
fn test_loads_root_url_from_file() {
    let config = Config::new(&root_url_schema(fixture("config.toml"))).unwrap();
    assert_eq!(config.get_str("root_url"), Some("test url"));
    assert!(config.is_loaded());
}

#[test]
fn test_nonexistent_file_leaves_required_entry_missing() {
    let result = Config::new(&root_url_schema(fixture("does-not-exist.toml")));
    match result {
        Err(ConfigError::MissingEntries(names)) => assert_eq!(names, ["root_url"]),
        other => panic!("expected MissingEntries, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_duplicate_keys_fail_to_load() {
    let result = Config::new(&root_url_schema(fixture(
        "invalid-toml-tests/dupe-keys.toml",
    )));
    assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
}

#[test]
fn test_source_token_parsing() {
    assert!(matches!("ENV".parse::<Source>(), Ok(Source::Env)));
    assert!(matches!("config.toml".parse::<Source>(), Ok(Source::File(_))));
    assert!(matches!(
        "config.ini".parse::<Source>(),
        Err(ConfigError::InvalidSource(_))
    ));
}

#[test]
fn test_nested_tables_flatten_into_entries() {
    #[derive(Debug, Deserialize)]
    struct Settings {
        root_url: String,
        database_host: String,
        database_port: i64,
        database_pool_size: i64,
    }

    let schema = Schema::builder("Nested")
        .source(Source::file(fixture("nested.toml")))
        .entry("root_url", ConfigEntry::string())
        .entry("database_host", ConfigEntry::string().default("localhost"))
        .entry("database_port", ConfigEntry::integer().default(5432))
        .entry("database_pool_size", ConfigEntry::integer().default(1))
        .build()
        .unwrap();

    let settings: Settings = Config::new(&schema).unwrap().extract().unwrap();
    assert_eq!(settings.root_url, "nested url");
    assert_eq!(settings.database_host, "db.internal");
    assert_eq!(settings.database_port, 5432);
    assert_eq!(settings.database_pool_size, 8);
}

#[test]
fn test_defaults_document_matches_declaration() {
    let schema = Schema::builder("TestConfig")
        .doc("The test configuration for configurave.")
        .entry(
            "root_url",
            ConfigEntry::string().comment("The root url configuration for the application"),
        )
        .entry("hosts", ConfigEntry::list(ValueType::String).default(vec!["a"]))
        .build()
        .unwrap();

    let document = schema.generate_defaults_document();
    let expected = "\
# The test configuration for configurave.
# This is an autogenerated default configuration file written by Configurave

# The root url configuration for the application
# type: string
# root_url =

# type: list[string]
hosts = [\"a\"]
";
    assert_eq!(document, expected);
}
