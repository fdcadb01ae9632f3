//! Scenario resolution errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("window override `{field}` is not an ISO-8601 timestamp: {value:?}")]
    InvalidWindowOverride {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("window `{0}` ends before it starts")]
    InvertedWindow(&'static str),
}
