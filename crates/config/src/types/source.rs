//! Configuration sources.
//!
//! Responsibilities:
//! - Define the three source kinds: environment, TOML file, and callable.
//! - Parse source tokens (`"ENV"`, `*.toml`) into sources.
//! - Normalize callable output into an ordered list of candidates.
//!
//! Does NOT handle:
//! - Reading from a source (see `loader::env`, `loader::file`, `loader::callable`).
//!
//! Invariants:
//! - Only paths whose extension is `toml` are file sources.
//! - Candidate order is the callable's own order (sequence or mapping insertion order).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::constants::{ENV_SOURCE_TOKEN, TOML_EXTENSION};
use crate::error::ConfigError;
use crate::loader::Config;
use crate::types::value::ConfigValue;

/// An ordered list of `(name, value)` pairs produced by a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates(pub Vec<(String, ConfigValue)>);

impl Candidates {
    pub fn into_inner(self) -> Vec<(String, ConfigValue)> {
        self.0
    }
}

impl<K, V> From<Vec<(K, V)>> for Candidates
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> From<IndexMap<K, V>> for Candidates
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from(map: IndexMap<K, V>) -> Self {
        Self(
            map.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

type SourceFn = Arc<dyn Fn(&Config) -> Result<Candidates, ConfigError> + Send + Sync>;

/// A source backed by a function of the instance being loaded.
#[derive(Clone)]
pub struct CallableSource {
    label: String,
    func: SourceFn,
}

impl CallableSource {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn call(&self, config: &Config) -> Result<Candidates, ConfigError> {
        (self.func)(config)
    }
}

impl fmt::Debug for CallableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableSource")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Where configuration values come from.
#[derive(Debug, Clone)]
pub enum Source {
    /// The process environment, after optionally loading `.env`.
    Env,
    /// A TOML file. Missing files are skipped.
    File(PathBuf),
    /// A callable invoked with the instance being loaded.
    Callable(CallableSource),
}

impl Source {
    /// Create a file source.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Create a callable source. `label` names the source in errors and logs.
    ///
    /// The callable may return a `Vec` of pairs or an `IndexMap`.
    pub fn callable<F, C>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Config) -> Result<C, ConfigError> + Send + Sync + 'static,
        C: Into<Candidates>,
    {
        Self::Callable(CallableSource {
            label: label.into(),
            func: Arc::new(move |config| f(config).map(Into::into)),
        })
    }

    /// Returns the human-readable label used in errors and logs.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Returns true if `path` carries the TOML extension.
    pub(crate) fn is_toml_path(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == TOML_EXTENSION)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => f.write_str(ENV_SOURCE_TOKEN),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Callable(callable) => write!(f, "callable {:?}", callable.label),
        }
    }
}

impl FromStr for Source {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ENV_SOURCE_TOKEN {
            return Ok(Self::Env);
        }
        let path = PathBuf::from(s);
        if Self::is_toml_path(&path) {
            Ok(Self::File(path))
        } else {
            Err(ConfigError::InvalidSource(s.to_string()))
        }
    }
}
