//! # clinicgate-types: core data model
//!
//! Shared vocabulary for the Clinicgate verification harness: principals,
//! typed objects, relation tuples, time-windowed conditions, and the opaque
//! store/model identifiers handed out by the decision service.
//!
//! Everything here is plain data. Policy evaluation belongs to the external
//! decision service; these types only describe the relationship graph we
//! write to it and the queries we ask of it.

pub mod condition;
pub mod identity;
pub mod tuple;

pub use condition::{Condition, EvaluationContext, TimeWindow, iso_utc};
pub use identity::{IdentityError, ModelId, ObjectRef, ObjectType, Principal, StoreId};
pub use tuple::{Relation, RelationTuple, Subject};
