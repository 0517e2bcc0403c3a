//! Configuration instance builder.
//!
//! Responsibilities:
//! - Bind an instance to its schema and extend the schema's sources per instance.
//! - Decide whether the instance is loaded during construction.
//!
//! Does NOT handle:
//! - The merge itself (see `config.rs`).
//!
//! Invariants / Assumptions:
//! - Per-instance sources are appended after the schema's, so they take precedence.
//! - Per-instance sources are validated against the capabilities the schema was declared with.
//! - Loading happens at construction unless `load_now(false)` is set.

use std::sync::Arc;

use super::config::Config;
use crate::error::ConfigError;
use crate::schema::{Schema, validate_sources};
use crate::types::Source;

/// Builder for a [`Config`] instance.
#[derive(Debug)]
pub struct ConfigBuilder {
    schema: Arc<Schema>,
    extra_sources: Vec<Source>,
    load_now: bool,
}

impl ConfigBuilder {
    /// Create a builder bound to `schema`.
    pub fn new(schema: &Arc<Schema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            extra_sources: Vec::new(),
            load_now: true,
        }
    }

    /// Append a per-instance source with higher priority than the schema's.
    pub fn source(mut self, source: Source) -> Self {
        self.extra_sources.push(source);
        self
    }

    /// Append several per-instance sources in priority order.
    pub fn sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.extra_sources.extend(sources);
        self
    }

    /// Set whether `build()` loads the instance (defaults to true).
    pub fn load_now(mut self, load_now: bool) -> Self {
        self.load_now = load_now;
        self
    }

    /// Build the instance, loading it unless disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if a per-instance source is invalid, or if loading fails.
    pub fn build(self) -> Result<Config, ConfigError> {
        validate_sources(&self.extra_sources, self.schema.capabilities())?;

        let sources: Vec<Source> = self
            .schema
            .sources()
            .iter()
            .cloned()
            .chain(self.extra_sources)
            .collect();

        let mut config = Config::unloaded(self.schema, sources);
        if self.load_now {
            config.load()?;
        }
        Ok(config)
    }
}
