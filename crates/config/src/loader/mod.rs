//! Configuration loader: the layered source-merge and validation engine.
//!
//! Responsibilities:
//! - Bind configuration instances to a shared schema (`ConfigBuilder`).
//! - Read candidates from environment, TOML file, and callable sources.
//! - Validate each candidate and merge accepted values by source priority.
//! - Check that every declared entry has a value after all sources ran.
//!
//! Does NOT handle:
//! - Declaring entries or sources (see `schema`).
//! - Rendering the defaults document (see `template`).
//!
//! Invariants / Assumptions:
//! - Later sources take precedence over earlier ones (last write wins per entry).
//! - Loading is synchronous and single-threaded; an instance is not shared while loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod callable;
mod config;
mod env;
mod file;
mod validation;

#[cfg(test)]
mod tests;

pub use builder::ConfigBuilder;
pub use config::{Config, SourceId};
#[cfg(all(test, feature = "dotenv"))]
pub(crate) use env::load_dotenv;
