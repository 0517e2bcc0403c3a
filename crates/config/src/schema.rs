//! Schema registry: the declared set of configuration entries and their sources.
//!
//! Responsibilities:
//! - Provide `SchemaBuilder` for declaring entries and sources explicitly.
//! - Validate sources against the available capabilities at declaration time.
//! - Reject duplicate declarations, invalid names, and mistyped defaults.
//!
//! Does NOT handle:
//! - Per-instance state such as values or provenance (see `loader::Config`).
//!
//! Invariants:
//! - Entries keep declaration order.
//! - A built `Schema` is immutable and shared behind an `Arc`.
//! - Declaring `Source::Env` without the dotenv capability fails before any load.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::types::{ConfigEntry, Source};

/// Optional capabilities a schema's sources may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCapabilities {
    /// Whether `.env` loading is available (required by `Source::Env`).
    pub dotenv: bool,
}

impl SourceCapabilities {
    /// Detect capabilities compiled into this build.
    pub fn detect() -> Self {
        Self {
            dotenv: cfg!(feature = "dotenv"),
        }
    }
}

impl Default for SourceCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Validates that no sources are used without their handler available.
pub fn validate_sources(
    sources: &[Source],
    capabilities: SourceCapabilities,
) -> Result<(), ConfigError> {
    for source in sources {
        match source {
            Source::Env if !capabilities.dotenv => return Err(ConfigError::EnvUnavailable),
            Source::File(path) if !Source::is_toml_path(path) => {
                return Err(ConfigError::InvalidSource(path.display().to_string()));
            }
            _ => {}
        }
    }
    Ok(())
}

/// The declared configuration schema for one configuration type.
#[derive(Debug)]
pub struct Schema {
    name: String,
    doc: Option<String>,
    entries: IndexMap<String, ConfigEntry>,
    sources: Vec<Source>,
    capabilities: SourceCapabilities,
}

impl Schema {
    /// Start declaring a schema.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Look up an entry by field name.
    pub fn get(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sources declared on the schema, in priority order (later wins).
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Capabilities the schema was declared with; per-instance sources are checked against them.
    pub fn capabilities(&self) -> SourceCapabilities {
        self.capabilities
    }

    /// Render the defaults document without constructing an instance.
    pub fn generate_defaults_document(&self) -> String {
        crate::template::render_defaults(self)
    }
}

/// Builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    doc: Option<String>,
    entries: Vec<(String, ConfigEntry)>,
    sources: Vec<Source>,
    capabilities: SourceCapabilities,
}

impl SchemaBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            entries: Vec::new(),
            sources: Vec::new(),
            capabilities: SourceCapabilities::detect(),
        }
    }

    /// Set the schema documentation, written at the top of generated documents.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Append a source. Later sources override earlier ones.
    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Append several sources in priority order.
    pub fn sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Declare an entry under `name`.
    pub fn entry(mut self, name: impl Into<String>, entry: ConfigEntry) -> Self {
        self.entries.push((name.into(), entry));
        self
    }

    /// Override the detected capabilities.
    pub fn capabilities(mut self, capabilities: SourceCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Validate the declaration and build the shared schema.
    pub fn build(self) -> Result<Arc<Schema>, ConfigError> {
        validate_sources(&self.sources, self.capabilities)?;

        let mut entries = IndexMap::with_capacity(self.entries.len());
        for (name, entry) in self.entries {
            if !is_bare_key(&name) {
                return Err(ConfigError::InvalidName(name));
            }
            if let Some(default) = entry.default_value() {
                if !entry.value_type().matches(default) {
                    return Err(ConfigError::InvalidDefault {
                        expected: entry.value_type().to_string(),
                        actual: default.type_name(),
                        name,
                    });
                }
            }
            if entries.contains_key(&name) {
                return Err(ConfigError::DuplicateDeclaration(name));
            }
            entries.insert(name, entry);
        }

        tracing::debug!(
            schema = %self.name,
            entries = entries.len(),
            sources = self.sources.len(),
            "Declared configuration schema"
        );

        Ok(Arc::new(Schema {
            name: self.name,
            doc: self.doc,
            entries,
            sources: self.sources,
            capabilities: self.capabilities,
        }))
    }
}

/// Returns true if `name` can be written as a bare TOML key.
fn is_bare_key(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
