//! # Document Loading
//!
//! Reads hyper-schema documents from disk. The format is chosen by file
//! extension: `.yaml`/`.yml` for YAML, anything else is parsed as JSON.
//! YAML documents deserialize straight into a `serde_json::Value` tree
//! before any link is interpreted.

use std::path::Path;

use jhs_core::DocumentError;
use serde_json::Value;

/// Load a JSON or YAML document from `path`.
///
/// # Errors
///
/// Returns [`DocumentError::Load`] if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let load_error = |reason: String| DocumentError::Load {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| load_error(format!("invalid YAML: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

/// Parse a JSON document held in memory.
///
/// # Errors
///
/// Returns [`DocumentError::Load`] naming `source` if the text is not JSON.
pub fn parse_json(source: &str, text: &str) -> Result<Value, DocumentError> {
    serde_json::from_str(text).map_err(|e| DocumentError::Load {
        path: source.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}
