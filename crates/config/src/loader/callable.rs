//! Callable source: user functions invoked with the instance being loaded.

use super::config::{Config, SourceId};
use crate::error::ConfigError;
use crate::types::CallableSource;

/// Invoke `callable` and apply each returned pair in the order it was produced.
///
/// The callable sees the instance as merged so far, so it may derive values from
/// earlier sources.
pub(crate) fn apply_callable(
    config: &mut Config,
    source: SourceId,
    callable: &CallableSource,
) -> Result<(), ConfigError> {
    let candidates = callable.call(config)?;
    tracing::debug!(
        source = %callable.label(),
        candidates = candidates.0.len(),
        "Callable source produced candidates"
    );

    for (name, value) in candidates.into_inner() {
        config.accept(source, name, value)?;
    }
    Ok(())
}
