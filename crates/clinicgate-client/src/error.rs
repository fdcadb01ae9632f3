//! Client error taxonomy.
//!
//! `Transport` is a network/connection failure; `Service` is a non-success
//! response from the decision service with the body preserved for diagnosis.
//! Neither is retried: the run is all-or-nothing per invocation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("decision service rejected {operation} (HTTP {status}): {body}")]
    Service {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("malformed {operation} response: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },
}
