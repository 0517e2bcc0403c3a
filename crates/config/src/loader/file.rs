//! TOML file source.
//!
//! Responsibilities:
//! - Read and parse a TOML document in full.
//! - Flatten nested tables into `outer_inner` entry names.
//! - Feed each flattened pair to the merge engine in document order.
//!
//! Does NOT handle:
//! - Rejecting unknown or duplicate entries (see `validation.rs`).
//!
//! Invariants:
//! - A missing file is skipped without error; missing config files are optional.
//! - Duplicate keys within one document fail at parse time (`ConfigError::TomlParse`).
//! - Nested tables are re-queued behind the current level, one level per pass, so
//!   top-level scalars are processed before any flattened table entries.

use std::collections::VecDeque;
use std::path::Path;

use super::config::{Config, SourceId};
use crate::constants::TABLE_KEY_SEPARATOR;
use crate::error::ConfigError;
use crate::types::ConfigValue;

/// Apply every entry of the TOML file at `path` to the instance.
pub(crate) fn apply_file(config: &mut Config, source: SourceId, path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Config file not found, skipping");
        return Ok(());
    }

    let table = read_toml_file(path)?;

    let mut queue: VecDeque<(String, toml::Value)> = table.into_iter().collect();
    while let Some((name, value)) = queue.pop_front() {
        if let toml::Value::Table(inner) = value {
            queue.extend(inner.into_iter().map(|(key, value)| {
                (format!("{name}{TABLE_KEY_SEPARATOR}{key}"), value)
            }));
            continue;
        }

        // Unknown names are reported before their values are converted.
        if !config.schema().contains(&name) {
            return Err(ConfigError::unexpected_entry(name, config.source_label(source)));
        }
        let value = ConfigValue::from_toml(&name, value)?;
        config.accept(source, name, value)?;
    }

    Ok(())
}

/// Read and parse a TOML document.
///
/// # Errors
///
/// - `ConfigError::FileRead` if the file cannot be read.
/// - `ConfigError::TomlParse` if the document is malformed, including duplicate keys.
pub(crate) fn read_toml_file(path: &Path) -> Result<toml::Table, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}
