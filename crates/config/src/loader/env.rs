//! Environment variable source.
//!
//! Responsibilities:
//! - Load `.env` (unless disabled) before reading the process environment.
//! - Read one environment variable per declared entry, named exactly like the entry.
//! - Coerce raw strings with the entry's parser and feed them to the merge engine.
//!
//! Does NOT handle:
//! - Type checking or duplicate detection (see `validation.rs`).
//! - Deciding whether the environment source may be declared (see `schema`).
//!
//! Invariants:
//! - Entries are visited in declaration order.
//! - Only absent variables are skipped; empty values are passed to the parser as-is.
//! - Values are never trimmed here; list parsing trims each piece.
//! - Coercion failures are hard errors.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::env::VarError;

use super::config::{Config, SourceId};
use crate::constants::DOTENV_DISABLED_VAR;
use crate::error::ConfigError;

/// Apply every declared entry found in the environment to the instance.
pub(crate) fn apply_env(config: &mut Config, source: SourceId) -> Result<(), ConfigError> {
    load_dotenv()?;

    let schema = std::sync::Arc::clone(config.schema());
    for (name, entry) in schema.entries() {
        let raw = match std::env::var(name) {
            Ok(raw) => raw,
            Err(VarError::NotPresent) => {
                tracing::trace!(var = %name, "Environment variable not set");
                continue;
            }
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::env_coercion(name, "value is not valid unicode"));
            }
        };

        let value = entry
            .parse_env(&raw)
            .map_err(|message| ConfigError::env_coercion(name, message))?;
        config.accept(source, name.to_string(), value)?;
    }

    Ok(())
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from .env file if present.
///
/// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
/// the .env file will not be loaded (useful for testing).
///
/// # Errors
///
/// Returns an error if:
/// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
/// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
///
/// Missing `.env` files are silently ignored.
///
/// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
#[cfg(feature = "dotenv")]
pub(crate) fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        tracing::trace!("Skipping .env loading, {} is set", DOTENV_DISABLED_VAR);
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

/// Without the dotenv capability there is no `.env` file to load.
#[cfg(not(feature = "dotenv"))]
pub(crate) fn load_dotenv() -> Result<(), ConfigError> {
    if !dotenv_disabled() {
        tracing::trace!(".env loading is not available in this build");
    }
    Ok(())
}

/// Check if a dotenv error indicates the file was not found.
#[cfg(feature = "dotenv")]
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
