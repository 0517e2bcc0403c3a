//! Error types for schema declaration and configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every declaration and loading failure.
//! - Provide constructors that keep call sites short.
//!
//! Does NOT handle:
//! - Errors raised inside user validators (they are wrapped as `ValidationFailed`).
//!
//! Invariants:
//! - All error variants include context for debugging (field names, sources, paths).
//! - Messages for secret entries never include the offending value.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while declaring a schema or loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration source {0:?} supplied")]
    InvalidSource(String),

    #[error(
        "Environment variables were specified as a source, but the dotenv capability is not available"
    )]
    EnvUnavailable,

    #[error("The configuration entry {0:?} is declared more than once")]
    DuplicateDeclaration(String),

    #[error("The configuration entry name {0:?} is not a valid bare key")]
    InvalidName(String),

    #[error("The default for {name:?} must be of type {expected}, not {actual}")]
    InvalidDefault {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("The configuration entry {name:?} from {source_label} is not an expected configuration value")]
    UnexpectedEntry { name: String, source_label: String },

    #[error(
        "The configuration entry for {name:?} must be of type {expected}, not {actual} with value {value}"
    )]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
        value: String,
    },

    #[error("The configuration entry {name:?} has two entries within source {source_label}")]
    DuplicateEntry { name: String, source_label: String },

    #[error("The configuration entry {name:?} failed validation: {message}")]
    ValidationFailed { name: String, message: String },

    #[error(
        "The configuration entries {} need to be set, but were never set in any of the sources loaded",
        .0.join(", ")
    )]
    MissingEntries(Vec<String>),

    #[error("Invalid value for environment variable {var}: {message}")]
    EnvCoercion { var: String, message: String },

    #[error("The configuration entry {name:?} holds an unsupported {kind} value")]
    UnsupportedValue { name: String, kind: String },

    #[error("Failed to read config file at {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to extract configuration into a typed value: {0}")]
    Extract(#[source] toml::de::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    pub(crate) fn unexpected_entry(name: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self::UnexpectedEntry {
            name: name.into(),
            source_label: source_label.into(),
        }
    }

    pub(crate) fn duplicate_entry(name: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self::DuplicateEntry {
            name: name.into(),
            source_label: source_label.into(),
        }
    }

    pub(crate) fn validation_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    pub(crate) fn env_coercion(var: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EnvCoercion {
            var: var.into(),
            message: message.into(),
        }
    }
}
