//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test instance construction, defaults, and completeness checking.
//! - Test each source adapter (TOML file, environment, callable) and `.env` loading.
//! - Test candidate validation order and error reporting.
//!
//! Does NOT handle:
//! - Environment variable helper behavior (tested in env.rs).
//! - Defaults document rendering (tested in template.rs).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub mod callable_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Writes `content` to `dir/name` and returns the full path.
pub fn write_toml(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test config file");
    path
}
