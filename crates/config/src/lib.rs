//! Declarative configuration loading.
//!
//! Declare a [`Schema`] of typed entries and an ordered list of [`Source`]s, then
//! construct [`Config`] instances against it. Loading walks the sources in
//! priority order (TOML files, the environment, or callables), validates every
//! candidate against the schema, lets later sources override earlier ones, and
//! finally checks that every entry has a value.
//!
//! ```no_run
//! use configurave::{Config, ConfigEntry, Schema, Source};
//!
//! # fn main() -> Result<(), configurave::ConfigError> {
//! let schema = Schema::builder("AppConfig")
//!     .source(Source::file("config.toml"))
//!     .source(Source::Env)
//!     .entry("root_url", ConfigEntry::string().comment("The root url of the application"))
//!     .entry("port", ConfigEntry::integer().default(8080))
//!     .build()?;
//!
//! let config = Config::new(&schema)?;
//! println!("serving {} on {}", config.get_str("root_url").unwrap_or_default(), config.get_integer("port").unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod constants;
mod error;
mod loader;
pub mod schema;
mod template;
pub mod types;

pub use error::ConfigError;
pub use loader::{Config, ConfigBuilder, SourceId};
pub use schema::{Schema, SchemaBuilder, SourceCapabilities, validate_sources};
pub use template::render_defaults;
pub use types::{
    CallableSource, Candidates, ConfigEntry, ConfigValue, Source, Validator, ValueType,
};
