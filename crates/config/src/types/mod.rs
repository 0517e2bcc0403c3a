//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define configuration values and declared value types.
//! - Define schema entries with their metadata, parsers, and validators.
//! - Define configuration sources and the candidates they produce.
//!
//! Does NOT handle:
//! - Building a schema from entries (see `schema`).
//! - Loading values from sources (see `loader`).
//!
//! Invariants:
//! - Values are flat scalars or lists; tables never reach an entry.
//! - Closures stored on entries and sources are `Send + Sync` so a schema can be shared.

mod entry;
mod source;
mod value;

pub use entry::{ConfigEntry, EnvParser, Validator, ValidatorFn};
pub use source::{CallableSource, Candidates, Source};
pub use value::{ConfigValue, ValueType};
