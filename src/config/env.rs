//! Environment snapshot and environment-variable overrides.
//!
//! The resolver never reads `std::env` ambiently. A single [`Env`] snapshot
//! is captured up front and threaded through resolution, so the same inputs
//! always produce the same `ToolchainConfig` and tests can inject an
//! environment without touching the process.

use std::collections::HashMap;

use super::error::ResolveError;
use super::ToolchainConfig;

/// Environment variable selecting the build's target product.
pub const ENV_TARGET_PRODUCT: &str = "TARGET_PRODUCT";
/// Path to the optional auto-enable config document.
pub const ENV_AE_CONFIG: &str = "SDCLANG_AE_CONFIG";
/// Path to the optional toolchain-override config document.
pub const ENV_CONFIG: &str = "SDCLANG_CONFIG";
/// Boolean: enable the static analyzer.
pub const ENV_SA_ENABLED: &str = "SDCLANG_SA_ENABLED";
/// Boolean: force the alternate toolchain on or off.
pub const ENV_ENABLED: &str = "SDCLANG";
/// Override for the primary toolchain path.
pub const ENV_PRIMARY_PATH: &str = "SDCLANG_PATH";
/// Override for the secondary toolchain path.
pub const ENV_SECONDARY_PATH: &str = "SDCLANG_PATH_2";
/// Whole-string override for the primary flags.
pub const ENV_PRIMARY_FLAGS: &str = "SDCLANG_COMMON_FLAGS";
/// Whole-string override for the secondary flags.
pub const ENV_SECONDARY_FLAGS: &str = "SDCLANG_COMMON_FLAGS_2";

/// An immutable snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Capture the current process environment.
    pub fn from_system() -> Self {
        Env {
            vars: std::env::vars().collect(),
        }
    }

    /// Get a variable's value, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Get a variable's value, treating unset and empty identically.
    pub fn get_nonempty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Parse a variable as a boolean.
    ///
    /// Accepts the forms `1/t/T/TRUE/true/True` and `0/f/F/FALSE/false/False`;
    /// anything else (including unset) is `None`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Env {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Re-apply environment overrides on top of the merged file configuration.
///
/// Each rule is independent; environment always wins for its own field.
/// Empty-string values never override, and an unparseable boolean is ignored
/// (the prior value is retained) rather than treated as an error.
pub fn apply_env(mut cfg: ToolchainConfig, env: &Env) -> ToolchainConfig {
    match env.get_bool(ENV_ENABLED) {
        Some(enabled) => cfg.enabled = enabled,
        None => {
            if env.get_nonempty(ENV_ENABLED).is_some() {
                tracing::warn!(
                    "ignoring unparseable boolean in ${}: {:?}",
                    ENV_ENABLED,
                    env.get(ENV_ENABLED).unwrap_or_default()
                );
            }
        }
    }

    if let Some(path) = env.get_nonempty(ENV_PRIMARY_PATH) {
        cfg.primary_path = path.to_string();
    }
    if let Some(path) = env.get_nonempty(ENV_SECONDARY_PATH) {
        cfg.secondary_path = path.to_string();
    }
    // Flags overrides replace the whole computed string, including the
    // auto-enable and static-analysis augmentation.
    if let Some(flags) = env.get_nonempty(ENV_PRIMARY_FLAGS) {
        cfg.primary_flags = flags.to_string();
    }
    if let Some(flags) = env.get_nonempty(ENV_SECONDARY_FLAGS) {
        cfg.secondary_flags = flags.to_string();
    }

    cfg
}

/// Post-condition check: both toolchain paths must be non-empty once file
/// merge and environment overrides have had their say.
pub fn ensure_paths(cfg: &ToolchainConfig) -> Result<(), ResolveError> {
    if cfg.primary_path.is_empty() {
        return Err(ResolveError::MissingRequiredPath(ENV_PRIMARY_PATH));
    }
    if cfg.secondary_path.is_empty() {
        return Err(ResolveError::MissingRequiredPath(ENV_SECONDARY_PATH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cfg() -> ToolchainConfig {
        ToolchainConfig {
            enabled: false,
            primary_path: "p1".into(),
            secondary_path: "p2".into(),
            primary_flags: "-a".into(),
            secondary_flags: "-b".into(),
        }
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let env: Env = [
            (ENV_ENABLED, "true"),
            (ENV_PRIMARY_PATH, "override"),
            (ENV_PRIMARY_FLAGS, "-x -y"),
        ]
        .into_iter()
        .collect();

        let cfg = apply_env(base_cfg(), &env);
        assert!(cfg.enabled);
        assert_eq!(cfg.primary_path, "override");
        assert_eq!(cfg.secondary_path, "p2");
        assert_eq!(cfg.primary_flags, "-x -y");
        assert_eq!(cfg.secondary_flags, "-b");
    }

    #[test]
    fn test_empty_env_value_never_overrides() {
        let env: Env = [(ENV_PRIMARY_PATH, ""), (ENV_SECONDARY_FLAGS, "")]
            .into_iter()
            .collect();

        let cfg = apply_env(base_cfg(), &env);
        assert_eq!(cfg.primary_path, "p1");
        assert_eq!(cfg.secondary_flags, "-b");
    }

    #[test]
    fn test_unparseable_bool_is_ignored() {
        let mut cfg = base_cfg();
        cfg.enabled = true;

        let env: Env = [(ENV_ENABLED, "enable-it-please")].into_iter().collect();
        let cfg = apply_env(cfg, &env);
        assert!(cfg.enabled, "prior value retained");
    }

    #[test]
    fn test_bool_forms() {
        let env: Env = [("A", "T"), ("B", "0"), ("C", "yes")].into_iter().collect();
        assert_eq!(env.get_bool("A"), Some(true));
        assert_eq!(env.get_bool("B"), Some(false));
        assert_eq!(env.get_bool("C"), None);
        assert_eq!(env.get_bool("D"), None);
    }

    #[test]
    fn test_ensure_paths() {
        assert!(ensure_paths(&base_cfg()).is_ok());

        let mut cfg = base_cfg();
        cfg.primary_path.clear();
        assert!(matches!(
            ensure_paths(&cfg),
            Err(ResolveError::MissingRequiredPath("SDCLANG_PATH"))
        ));

        let mut cfg = base_cfg();
        cfg.secondary_path.clear();
        assert!(matches!(
            ensure_paths(&cfg),
            Err(ResolveError::MissingRequiredPath("SDCLANG_PATH_2"))
        ));
    }
}
