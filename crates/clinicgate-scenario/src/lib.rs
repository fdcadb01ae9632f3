//! # clinicgate-scenario: scenario construction
//!
//! Builds the dental-clinic test policy instance as data: the canonical
//! ordered set of relation tuples (role assignments, hierarchy links,
//! time-windowed grants) and the verification plan of checks with their
//! documented expected outcomes.
//!
//! Everything in this crate is pure. Tuple sets and plans are derived from a
//! resolved [`ScenarioConfig`] whose reference instant is captured once by
//! the caller, so the same configuration replays to the same output.

mod builder;
mod error;
mod plan;
mod resolve;

pub use builder::build_tuples;
pub use error::ScenarioError;
pub use plan::{
    CheckAssertion, ListObjectsAssertion, VerificationPlan, verification_plan,
};
pub use resolve::{ScenarioConfig, ScenarioObjects, ScenarioPrincipals};
