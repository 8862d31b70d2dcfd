//! Mount error taxonomy.
//!
//! All validation here is advisory and dev-build only: debug builds
//! surface these errors from the mount entry point, release builds skip
//! the checks entirely and let malformed input degrade to a logged
//! no-op at the first operation that cannot handle it.

use thiserror::Error;

/// Errors surfaced by mount-time validation.
#[derive(Debug, Error)]
pub enum MountError {
    /// Top-level input was neither a primitive, a view node, nor a
    /// sequence, or a view node carried no usable kind.
    #[error("invalid mount input: {0}")]
    InvalidInput(String),

    /// A ref was not the callback (or hooks object) its node kind
    /// expects.
    #[error("invalid ref: {0}")]
    InvalidRef(String),

    /// A lifecycle-hook-shaped ref was placed on a class component; that
    /// pattern is reserved for functional components.
    #[error("refs with lifecycle hooks are only supported on functional components")]
    UnsupportedRefUsage,
}

/// Gate a validation failure on the build mode.
///
/// Debug builds get `Some(err)` to propagate; release builds log the
/// fault and get `None`, and the caller degrades to a no-op for that
/// node.
pub(crate) fn dev_only(err: MountError) -> Option<MountError> {
    if cfg!(debug_assertions) {
        Some(err)
    } else {
        tracing::warn!(error = %err, "mount validation skipped in release build");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MountError::InvalidInput("cannot mount boolean input".into());
        assert_eq!(
            err.to_string(),
            "invalid mount input: cannot mount boolean input"
        );

        let err = MountError::InvalidRef("string refs are not supported".into());
        assert!(err.to_string().contains("string refs"));

        assert!(MountError::UnsupportedRefUsage
            .to_string()
            .contains("functional components"));
    }
}
