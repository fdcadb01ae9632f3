//! # clinicgate: verification runner and run state
//!
//! Drives the linear provisioning pipeline against a decision service and
//! verifies the policy's documented intent:
//!
//! ```text
//! NotStarted → StoreReady → ModelInstalled → TuplesWritten → Verified|Failed
//! ```
//!
//! Each stage requires the previous one to have succeeded; there is no
//! rollback and no retry. The runner is generic over
//! [`clinicgate_client::DecisionService`], so tests drive it with an
//! in-memory mock instead of a network.

mod model;
mod report;
mod runner;
mod state;

pub use model::{ModelDocumentError, load_model_document};
pub use report::{AssertionOutcome, AssertionResult, VerificationReport};
pub use runner::{RunError, Stage, VerificationRun};
pub use state::{RunState, StateError};
