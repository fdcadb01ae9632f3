//! # clinicgate-client: decision-service boundary
//!
//! Typed client for the five decision-service operations Clinicgate uses:
//! create store, install authorization model, write tuples, check, and
//! list objects. Each operation has explicit request/response structures
//! validated at deserialization, never optional-key dictionary lookups.
//!
//! The [`DecisionService`] trait is the seam between the verification runner
//! and the network. Production code uses [`HttpDecisionService`]; tests
//! substitute an in-memory mock.

pub mod api;
mod error;
mod http;
mod service;

pub use error::ClientError;
pub use http::HttpDecisionService;
pub use service::DecisionService;
