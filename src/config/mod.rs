//! Toolchain-configuration resolution.
//!
//! The build decides once, at configuration time, which native compiler
//! toolchain to use and with which flags. Three layers feed the decision,
//! lowest precedence first:
//!
//! 1. the `"default"` block of the toolchain-override JSON document,
//! 2. the block keyed by the target product name in the same document,
//! 3. environment variables, which always win for their own field.
//!
//! An optional auto-enable document contributes one extra flag string, and a
//! static-analysis switch appends a fixed marker to the primary flags.
//! Resolution is a pure function of the two documents and an [`Env`]
//! snapshot: no globals, and re-running with the same inputs produces an
//! identical [`ToolchainConfig`].

pub mod env;
pub mod error;
pub mod loader;
pub mod merge;

use std::path::Path;

pub use env::{apply_env, ensure_paths, Env};
pub use error::ResolveError;
pub use loader::{AeConfig, RawToolchainDoc};
pub use merge::{merge, SA_MARKER_FLAG, SA_OUTPUT_DIR};

use env::{ENV_AE_CONFIG, ENV_CONFIG, ENV_SA_ENABLED, ENV_TARGET_PRODUCT};

/// The fully resolved toolchain decision. Non-sparse: every field has its
/// final value, with all layers and augmentations applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Whether the alternate toolchain is used at all.
    pub enabled: bool,
    /// Path to the primary compiler installation.
    pub primary_path: String,
    /// Path to the secondary compiler installation.
    pub secondary_path: String,
    /// Flags passed to the primary compiler.
    pub primary_flags: String,
    /// Flags passed to the secondary compiler.
    pub secondary_flags: String,
}

/// Resolve the toolchain configuration from config files and environment.
///
/// Optional-resource absence (either config file missing) is recovered
/// locally; every other failure is fatal and nothing partial escapes.
pub fn resolve(env: &Env) -> Result<ToolchainConfig, ResolveError> {
    let product = env.get(ENV_TARGET_PRODUCT).unwrap_or_default();
    let sa_enabled = env.get_bool(ENV_SA_ENABLED).unwrap_or(false);

    let ae = loader::load_ae_config(env.get_nonempty(ENV_AE_CONFIG).map(Path::new))?;
    let doc = loader::load_toolchain_doc(env.get_nonempty(ENV_CONFIG).map(Path::new))?;

    let mut cfg = match &doc {
        Some(doc) => merge::merge(doc, product, sa_enabled)?,
        None => ToolchainConfig::default(),
    };

    if let Some(ae) = ae {
        cfg.primary_flags = join_flags(&cfg.primary_flags, &ae.flag);
    }

    let cfg = env::apply_env(cfg, env);
    env::ensure_paths(&cfg)?;
    Ok(cfg)
}

/// Join two flag strings with a single space, eliding the separator when
/// either side is empty.
pub(crate) fn join_flags(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}
