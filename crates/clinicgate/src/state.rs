//! Durable run state: the resolved service URL and store/model ids.
//!
//! Written right after a successful model installation so a later invocation
//! can pin the store id and resume from the tuple-write stage. This is local
//! developer/test state; overwriting on a successful run is intended
//! (last-writer-wins).

use clinicgate_types::{ModelId, StoreId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write state file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("state file {path} is malformed: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("failed to serialize run state: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Key-value record of one successful provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub api_url: String,
    pub store_id: StoreId,
    pub model_id: ModelId,
}

impl RunState {
    /// Loads prior state, returning `None` when no state file exists yet.
    pub fn load(path: &Path) -> Result<Option<Self>, StateError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StateError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        let state = toml::from_str(&raw).map_err(|source| StateError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(state))
    }

    /// Persists this state, replacing any previous record.
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let raw = toml::to_string(self)?;
        std::fs::write(path, raw).map_err(|source| StateError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}
