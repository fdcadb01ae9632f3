//! Authorization model document loading.
//!
//! The model is opaque to Clinicgate: it is parsed only far enough to catch
//! an unreadable or obviously wrong file before any network call, then
//! passed through to the decision service verbatim.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelDocumentError {
    #[error("failed to read model document {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("model document {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("model document {path} has no `type_definitions`; is it a transformed authorization model?")]
    NotAModel { path: String },
}

/// Reads and sanity-checks the authorization model JSON document.
pub fn load_model_document(path: &Path) -> Result<serde_json::Value, ModelDocumentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ModelDocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let document: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| ModelDocumentError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    if document.get("type_definitions").is_none() {
        return Err(ModelDocumentError::NotAModel {
            path: path.display().to_string(),
        });
    }
    Ok(document)
}
