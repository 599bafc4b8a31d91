//! Filesystem helpers for include-path variables.

use std::path::Path;

/// Keep only the relative paths that exist under `root`.
pub fn existent_paths<'a>(root: &Path, paths: &[&'a str]) -> Vec<&'a str> {
    paths
        .iter()
        .copied()
        .filter(|p| root.join(p).exists())
        .collect()
}

/// Prefix each existing path and join the result with spaces, e.g.
/// `-Isystem/core/include -Iframeworks/native/include`.
pub fn prefixed_existent_paths(root: &Path, prefix: &str, paths: &[&str]) -> String {
    existent_paths(root, paths)
        .into_iter()
        .map(|p| format!("{}{}", prefix, p))
        .collect::<Vec<_>>()
        .join(" ")
}
