//! Callable source tests.
//!
//! Responsibilities:
//! - Test callables returning pair sequences and mappings.
//! - Test that callables see values merged from earlier sources.
//! - Test duplicate, unknown, and failing callable output.

use std::sync::Arc;

use indexmap::IndexMap;
use tempfile::TempDir;

use super::write_toml;
use crate::error::ConfigError;
use crate::loader::Config;
use crate::schema::Schema;
use crate::types::{ConfigEntry, ConfigValue, Source};

fn schema_with(source: Source) -> Arc<Schema> {
    Schema::builder("App")
        .source(source)
        .entry("host", ConfigEntry::string())
        .entry("port", ConfigEntry::integer().default(80))
        .build()
        .unwrap()
}

#[test]
fn test_callable_returning_pairs() {
    let schema = schema_with(Source::callable("pairs", |_| {
        Ok(vec![
            ("host", ConfigValue::from("example.com")),
            ("port", ConfigValue::from(443)),
        ])
    }));

    let config = Config::new(&schema).unwrap();
    assert_eq!(config.get_str("host"), Some("example.com"));
    assert_eq!(config.get_integer("port"), Some(443));
    assert!(matches!(config.source_of("host"), Some(Source::Callable(c)) if c.label() == "pairs"));
}

#[test]
fn test_callable_returning_mapping() {
    let schema = schema_with(Source::callable("mapping", |_| {
        let mut values = IndexMap::new();
        values.insert("host".to_string(), ConfigValue::from("mapped"));
        Ok(values)
    }));

    let config = Config::new(&schema).unwrap();
    assert_eq!(config.get_str("host"), Some("mapped"));
}

#[test]
fn test_callable_sees_earlier_sources() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_toml(temp_dir.path(), "config.toml", "host = \"db.internal\"\n");

    let schema = Schema::builder("App")
        .source(Source::file(&path))
        .source(Source::callable("derived", |config: &Config| {
            let host = config.get_str("host").unwrap_or("localhost");
            Ok(vec![("url", format!("postgres://{host}"))])
        }))
        .entry("host", ConfigEntry::string())
        .entry("url", ConfigEntry::string())
        .build()
        .unwrap();

    let config = Config::new(&schema).unwrap();
    assert_eq!(config.get_str("url"), Some("postgres://db.internal"));
}

#[test]
fn test_callable_duplicate_name_is_rejected() {
    let schema = schema_with(Source::callable("dupes", |_| {
        Ok(vec![("host", "first"), ("host", "second")])
    }));

    let mut config = Config::builder(&schema).load_now(false).build().unwrap();
    match config.load() {
        Err(ConfigError::DuplicateEntry { name, source_label }) => {
            assert_eq!(name, "host");
            assert!(source_label.contains("dupes"));
        }
        other => panic!("expected DuplicateEntry, got {:?}", other),
    }
    assert_eq!(config.get_str("host"), Some("first"));
}

#[test]
fn test_two_callables_may_set_the_same_entry() {
    let schema = Schema::builder("App")
        .source(Source::callable("one", |_| Ok(vec![("host", "one")])))
        .source(Source::callable("two", |_| Ok(vec![("host", "two")])))
        .entry("host", ConfigEntry::string())
        .build()
        .unwrap();

    let config = Config::new(&schema).unwrap();
    assert_eq!(config.get_str("host"), Some("two"));
}

#[test]
fn test_callable_unknown_name_is_rejected() {
    let schema = schema_with(Source::callable("typo", |_| Ok(vec![("hots", "x")])));
    assert!(matches!(
        Config::new(&schema),
        Err(ConfigError::UnexpectedEntry { name, .. }) if name == "hots"
    ));
}

#[test]
fn test_callable_error_propagates() {
    let schema = schema_with(Source::callable("broken", |_| {
        Err::<Vec<(String, ConfigValue)>, _>(ConfigError::InvalidSource("vault".to_string()))
    }));
    assert!(matches!(
        Config::new(&schema),
        Err(ConfigError::InvalidSource(label)) if label == "vault"
    ));
}
