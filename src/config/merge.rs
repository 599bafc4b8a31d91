//! Precedence merge of the toolchain-override document.
//!
//! The `"default"` block is the mandatory baseline; a block keyed by the
//! exact target-product name overrides it field-wise. Fields absent from the
//! product block inherit the default's value, and required-field validation
//! applies to the default block only.

use serde_json::{Map, Value};

use super::error::ResolveError;
use super::loader::RawToolchainDoc;
use super::{join_flags, ToolchainConfig};

pub(crate) const KEY_DEFAULT: &str = "default";
const KEY_ENABLED: &str = "SDCLANG";
const KEY_PRIMARY_PATH: &str = "SDCLANG_PATH";
const KEY_SECONDARY_PATH: &str = "SDCLANG_PATH_2";
const KEY_PRIMARY_FLAGS: &str = "SDCLANG_FLAGS";
const KEY_SECONDARY_FLAGS: &str = "SDCLANG_FLAGS_2";

/// Marker flag appended to the primary flags when static analysis is on.
pub const SA_MARKER_FLAG: &str = "--compile-and-analyze";
/// Output location argument accompanying the marker flag.
pub const SA_OUTPUT_DIR: &str = "llvmsa";

/// Merge the default block with the product-specific block, then apply the
/// static-analysis augmentation.
pub fn merge(
    doc: &RawToolchainDoc,
    product: &str,
    sa_enabled: bool,
) -> Result<ToolchainConfig, ResolveError> {
    let default = doc
        .block(KEY_DEFAULT)
        .ok_or(ResolveError::MissingDefaultBlock)?;
    let default = as_block(default, KEY_DEFAULT)?;

    let mut cfg = ToolchainConfig {
        enabled: get_bool(default, KEY_ENABLED)?.unwrap_or(false),
        primary_path: get_str(default, KEY_PRIMARY_PATH)?
            .ok_or(ResolveError::MissingRequiredField(KEY_PRIMARY_PATH))?
            .to_string(),
        secondary_path: get_str(default, KEY_SECONDARY_PATH)?
            .ok_or(ResolveError::MissingRequiredField(KEY_SECONDARY_PATH))?
            .to_string(),
        primary_flags: get_str(default, KEY_PRIMARY_FLAGS)?
            .unwrap_or_default()
            .to_string(),
        secondary_flags: get_str(default, KEY_SECONDARY_FLAGS)?
            .unwrap_or_default()
            .to_string(),
    };

    // Only the exact product-name key participates; every field is optional
    // here and inherits the default-derived value when absent.
    if let Some(block) = doc.block(product) {
        let block = as_block(block, product)?;
        if let Some(enabled) = get_bool(block, KEY_ENABLED)? {
            cfg.enabled = enabled;
        }
        if let Some(path) = get_str(block, KEY_PRIMARY_PATH)? {
            cfg.primary_path = path.to_string();
        }
        if let Some(path) = get_str(block, KEY_SECONDARY_PATH)? {
            cfg.secondary_path = path.to_string();
        }
        if let Some(flags) = get_str(block, KEY_PRIMARY_FLAGS)? {
            cfg.primary_flags = flags.to_string();
        }
        if let Some(flags) = get_str(block, KEY_SECONDARY_FLAGS)? {
            cfg.secondary_flags = flags.to_string();
        }
    }

    if sa_enabled {
        let marker = format!("{} {}", SA_MARKER_FLAG, SA_OUTPUT_DIR);
        cfg.primary_flags = join_flags(&cfg.primary_flags, &marker);
        tracing::info!("clang static analysis enabled: {}", cfg.primary_flags);
    } else {
        tracing::info!("clang static analysis not enabled");
    }

    Ok(cfg)
}

fn as_block<'a>(value: &'a Value, key: &str) -> Result<&'a Map<String, Value>, ResolveError> {
    value
        .as_object()
        .ok_or_else(|| ResolveError::type_mismatch(key, "an object"))
}

fn get_bool(block: &Map<String, Value>, key: &'static str) -> Result<Option<bool>, ResolveError> {
    match block.get(key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ResolveError::type_mismatch(key, "a boolean")),
    }
}

fn get_str<'a>(
    block: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a str>, ResolveError> {
    match block.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ResolveError::type_mismatch(key, "a string")),
    }
}
