//! Typed errors for toolchain-configuration resolution.
//!
//! Every fatal condition in the resolution pipeline maps to exactly one
//! variant here; callers decide whether to abort. Optional-resource absence
//! and unparseable environment booleans are never errors (they are logged
//! and recovered locally).

use std::path::PathBuf;

use thiserror::Error;

/// A fatal configuration-resolution error.
///
/// No partial `ToolchainConfig` is ever published after any of these; the
/// whole resolution phase fails as a unit.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A config file exists but is not valid JSON, or does not match the
    /// minimal expected shape for its document kind.
    #[error("malformed config file {}: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The toolchain-override document has no `"default"` block.
    #[error("`default` block is required in the toolchain config file")]
    MissingDefaultBlock,

    /// A field the default block must supply is absent.
    #[error("`{0}` is required in the `default` block")]
    MissingRequiredField(&'static str),

    /// A compiler path is still empty after file merge and environment
    /// overrides.
    #[error("`{0}` can not be empty")]
    MissingRequiredPath(&'static str),

    /// A block or field is present but has the wrong JSON type.
    #[error("`{key}` has the wrong type: expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
    },
}

impl ResolveError {
    pub(crate) fn type_mismatch(key: impl Into<String>, expected: &'static str) -> Self {
        ResolveError::TypeMismatch {
            key: key.into(),
            expected,
        }
    }
}
