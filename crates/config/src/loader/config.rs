//! Configuration instances and the layered merge engine.
//!
//! Responsibilities:
//! - Hold per-instance values, provenance, and the `loaded` flag.
//! - Drive the source adapters in priority order and write accepted values.
//! - Verify completeness once all sources are exhausted.
//! - Expose typed accessors and serde extraction over the loaded values.
//!
//! Does NOT handle:
//! - Reading individual sources (see `env.rs`, `file.rs`, `callable.rs`).
//! - The per-candidate validation rules (see `validation.rs`).
//!
//! Invariants:
//! - Provenance lives on the instance, never on the shared schema.
//! - `load()` starts from the declared defaults with empty provenance, so it can be
//!   called repeatedly.
//! - Later sources overwrite earlier ones for the same entry (last write wins).
//! - A failed load leaves earlier assignments in place and `loaded` false.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::de::DeserializeOwned;

use super::builder::ConfigBuilder;
use super::validation::validate_candidate;
use super::{callable, env, file};
use crate::error::ConfigError;
use crate::schema::Schema;
use crate::template;
use crate::types::{ConfigValue, Source};

/// Position of a source within an instance's source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub(crate) usize);

impl SourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A configuration instance populated from its schema's sources.
pub struct Config {
    schema: Arc<Schema>,
    sources: Vec<Source>,
    values: IndexMap<String, ConfigValue>,
    provenance: HashMap<String, SourceId>,
    loaded: bool,
}

impl Config {
    /// Construct an instance against `schema` and load it immediately.
    pub fn new(schema: &Arc<Schema>) -> Result<Self, ConfigError> {
        ConfigBuilder::new(schema).build()
    }

    /// Start building an instance with extra sources or deferred loading.
    pub fn builder(schema: &Arc<Schema>) -> ConfigBuilder {
        ConfigBuilder::new(schema)
    }

    pub(crate) fn unloaded(schema: Arc<Schema>, sources: Vec<Source>) -> Self {
        let mut config = Self {
            schema,
            sources,
            values: IndexMap::new(),
            provenance: HashMap::new(),
            loaded: false,
        };
        config.reset();
        config
    }

    /// Load the configuration from every source, in priority order.
    ///
    /// Values are reset to the declared defaults first, so calling `load()` again
    /// re-merges from scratch.
    ///
    /// # Errors
    ///
    /// Returns the first failure raised by a source adapter, by candidate
    /// validation, or by the completeness check. There is no rollback: entries
    /// assigned before the failure keep their new values.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        self.reset();

        let sources = self.sources.clone();
        for (index, source) in sources.iter().enumerate() {
            let id = SourceId(index);
            tracing::debug!(source = %source, schema = %self.schema.name(), "Loading configuration source");
            match source {
                Source::Env => env::apply_env(self, id)?,
                Source::File(path) => file::apply_file(self, id, path)?,
                Source::Callable(callable) => callable::apply_callable(self, id, callable)?,
            }
        }

        self.validate_fully_configured()?;
        self.loaded = true;
        Ok(())
    }

    /// Ensure every declared entry has a value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEntries` naming every entry without a value.
    pub fn validate_fully_configured(&self) -> Result<(), ConfigError> {
        let missing: Vec<String> = self
            .schema
            .names()
            .filter(|name| !self.values.contains_key(*name))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingEntries(missing))
        }
    }

    /// Render a TOML template of every entry with its default value.
    ///
    /// Secret entries and entries without defaults are written as commented placeholders.
    pub fn generate_defaults_document(&self) -> String {
        template::render_defaults(&self.schema)
    }

    /// Validate a candidate from `source` and, if accepted, assign it.
    pub(crate) fn accept(
        &mut self,
        source: SourceId,
        name: String,
        value: ConfigValue,
    ) -> Result<(), ConfigError> {
        validate_candidate(self, source, &name, &value)?;

        let secret = self.schema.get(&name).is_some_and(|entry| entry.is_secret());
        if secret {
            tracing::debug!(entry = %name, source = %self.source_label(source), "Accepted configuration entry");
        } else {
            tracing::debug!(entry = %name, source = %self.source_label(source), value = %value, "Accepted configuration entry");
        }

        self.provenance.insert(name.clone(), source);
        self.values.insert(name, value);
        Ok(())
    }

    pub(crate) fn source_label(&self, source: SourceId) -> String {
        self.sources
            .get(source.0)
            .map(Source::label)
            .unwrap_or_else(|| format!("source #{}", source.0))
    }

    pub(crate) fn provenance_of(&self, name: &str) -> Option<SourceId> {
        self.provenance.get(name).copied()
    }

    fn reset(&mut self) {
        self.loaded = false;
        self.provenance.clear();
        self.values = self
            .schema
            .entries()
            .filter_map(|(name, entry)| {
                entry
                    .default_value()
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect();
    }

    /// Whether the last `load()` completed and every entry has a value.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Sources this instance loads from: the schema's followed by per-instance ones.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// All current values, in assignment order.
    pub fn values(&self) -> &IndexMap<String, ConfigValue> {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ConfigValue::as_str)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ConfigValue::as_integer)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ConfigValue::as_float)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ConfigValue::as_bool)
    }

    pub fn get_list(&self, name: &str) -> Option<&[ConfigValue]> {
        self.get(name).and_then(ConfigValue::as_list)
    }

    /// Returns a string entry wrapped as a secret, so it is not accidentally logged.
    pub fn get_secret(&self, name: &str) -> Option<SecretString> {
        self.get_str(name)
            .map(|s| SecretString::new(s.to_string().into()))
    }

    /// The source that most recently supplied `name` during the last load.
    ///
    /// Returns `None` for entries still holding their declared default.
    pub fn source_of(&self, name: &str) -> Option<&Source> {
        self.provenance_of(name)
            .and_then(|id| self.sources.get(id.0))
    }

    /// Deserialize the current values into a typed struct.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Extract` if the values do not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let table: toml::Table = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_toml()))
            .collect();
        toml::Value::Table(table)
            .try_into()
            .map_err(ConfigError::Extract)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<(&str, String)> = self
            .values
            .iter()
            .map(|(name, value)| {
                let secret = self.schema.get(name).is_some_and(|entry| entry.is_secret());
                let rendered = if secret {
                    "[REDACTED]".to_string()
                } else {
                    value.to_string()
                };
                (name.as_str(), rendered)
            })
            .collect();

        f.debug_struct("Config")
            .field("schema", &self.schema.name())
            .field("values", &values)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
