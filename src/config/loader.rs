//! Loading of the two optional JSON config documents.
//!
//! Both documents are opt-in: a missing path or missing file is not an
//! error, only a logged note. A file that exists but fails to parse is
//! always fatal — a build should never silently run with half a config.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::ResolveError;

/// The auto-enable document: a single required string field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AeConfig {
    /// Flag string appended to the primary flags when the document exists.
    #[serde(rename = "SDCLANG_AE_FLAG")]
    pub flag: String,
}

/// The toolchain-override document, parsed only as far as "an object keyed
/// by block name". Per-block shape is enforced later by the merger.
#[derive(Debug, Clone)]
pub struct RawToolchainDoc {
    blocks: Map<String, Value>,
}

impl RawToolchainDoc {
    pub(crate) fn new(blocks: Map<String, Value>) -> Self {
        RawToolchainDoc { blocks }
    }

    /// Look up a block by exact key.
    pub fn block(&self, key: &str) -> Option<&Value> {
        self.blocks.get(key)
    }
}

/// Load the auto-enable document, if configured and present.
pub fn load_ae_config(path: Option<&Path>) -> Result<Option<AeConfig>, ResolveError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let Some(text) = read_optional(path) else {
        return Ok(None);
    };

    let ae = serde_json::from_str::<AeConfig>(&text).map_err(|source| ResolveError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(ae))
}

/// Load the toolchain-override document, if configured and present.
pub fn load_toolchain_doc(path: Option<&Path>) -> Result<Option<RawToolchainDoc>, ResolveError> {
    let Some(path) = path else {
        tracing::info!("no toolchain config file set, alternate toolchain disabled");
        return Ok(None);
    };
    let Some(text) = read_optional(path) else {
        tracing::info!(
            "toolchain config file not found: {}, alternate toolchain disabled",
            path.display()
        );
        return Ok(None);
    };

    let blocks = serde_json::from_str::<Map<String, Value>>(&text).map_err(|source| {
        ResolveError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(Some(RawToolchainDoc::new(blocks)))
}

/// Read a file that is allowed to be absent. Unreadable counts as absent;
/// only content-level problems are fatal, and those are the caller's call.
fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("could not read {}: {}", path.display(), e);
            None
        }
    }
}
