//! Candidate validation for the merge engine.
//!
//! Responsibilities:
//! - Decide whether a `(name, value)` candidate from a source may be assigned.
//!
//! Does NOT handle:
//! - Assigning values or recording provenance (see `config.rs`).
//! - Checking completeness after all sources ran (see `Config::validate_fully_configured`).
//!
//! Invariants:
//! - Checks run in a fixed order: unknown entry, type, duplicate within source, validator.
//! - Type mismatch messages for secret entries never include the value.

use super::config::{Config, SourceId};
use crate::error::ConfigError;
use crate::types::{ConfigValue, Validator};

/// Validate that a candidate fits its declared entry and source.
pub(crate) fn validate_candidate(
    config: &Config,
    source: SourceId,
    name: &str,
    value: &ConfigValue,
) -> Result<(), ConfigError> {
    let Some(entry) = config.schema().get(name) else {
        return Err(ConfigError::unexpected_entry(name, config.source_label(source)));
    };

    if !entry.value_type().matches(value) {
        return Err(ConfigError::TypeMismatch {
            name: name.to_string(),
            expected: entry.value_type().to_string(),
            actual: value.type_name(),
            value: if entry.is_secret() {
                "[REDACTED]".to_string()
            } else {
                value.to_string()
            },
        });
    }

    if config.provenance_of(name) == Some(source) {
        return Err(ConfigError::duplicate_entry(name, config.source_label(source)));
    }

    match entry.validator_ref() {
        Some(Validator::Predicate(check)) => {
            check(config, value).map_err(|message| ConfigError::validation_failed(name, message))
        }
        Some(Validator::OneOf(allowed)) => {
            if allowed.contains(value) {
                Ok(())
            } else if entry.is_secret() {
                Err(ConfigError::validation_failed(
                    name,
                    "value is not one of the allowed values",
                ))
            } else {
                let allowed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                Err(ConfigError::validation_failed(
                    name,
                    format!("{value} is not one of [{}]", allowed.join(", ")),
                ))
            }
        }
        None => Ok(()),
    }
}
