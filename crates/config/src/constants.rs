//! Centralized constants for configuration loading.
//!
//! This module contains the source tokens, file extensions, and formatting
//! widths shared by the schema, the source adapters, and the defaults
//! document generator.

// =============================================================================
// Source Tokens
// =============================================================================

/// Token that selects the process environment as a source.
pub const ENV_SOURCE_TOKEN: &str = "ENV";

/// File extension recognized as a TOML file source.
pub const TOML_EXTENSION: &str = "toml";

/// Separator placed between a table name and its inner keys when flattening.
pub const TABLE_KEY_SEPARATOR: char = '_';

/// Separator between items of a list-typed environment variable.
pub const ENV_LIST_SEPARATOR: char = ',';

// =============================================================================
// Dotenv
// =============================================================================

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Defaults Document
// =============================================================================

/// Column at which entry descriptions are wrapped in generated documents.
pub const DESCRIPTION_WRAP_WIDTH: usize = 88;

/// Banner written at the top of every generated defaults document.
pub const DEFAULTS_BANNER: &str =
    "This is an autogenerated default configuration file written by Configurave";
