//! The decision-service trait: the seam between runner and network.

use crate::error::ClientError;
use clinicgate_types::{
    EvaluationContext, ModelId, ObjectRef, ObjectType, Principal, Relation, RelationTuple, StoreId,
};
use std::collections::BTreeSet;

/// The five operations Clinicgate needs from an authorization decision
/// service.
///
/// Implementations must be side-effect-free on failure from the caller's
/// perspective: a returned error means the operation did not take effect
/// (or, for tuple writes under duplicate-skip, took effect idempotently).
pub trait DecisionService {
    /// Create a tenant store, returning its opaque id.
    fn create_store(&self, name: &str) -> Result<StoreId, ClientError>;

    /// Install an authorization model document into the store.
    fn write_authorization_model(
        &self,
        store: &StoreId,
        model: &serde_json::Value,
    ) -> Result<ModelId, ClientError>;

    /// Write a batch of relation tuples under the duplicate-skip policy.
    fn write_tuples(
        &self,
        store: &StoreId,
        model: &ModelId,
        tuples: &[RelationTuple],
    ) -> Result<(), ClientError>;

    /// Point-in-time check: does `user` hold `relation` on `object` under
    /// `context`?
    fn check(
        &self,
        store: &StoreId,
        model: &ModelId,
        user: &Principal,
        relation: Relation,
        object: &ObjectRef,
        context: &EvaluationContext,
    ) -> Result<bool, ClientError>;

    /// All objects of `object_type` for which `user` holds `relation` under
    /// `context`. The service gives no ordering guarantee; results come back
    /// as a set of `<type>:<id>` identifiers.
    fn list_objects(
        &self,
        store: &StoreId,
        model: &ModelId,
        object_type: ObjectType,
        relation: Relation,
        user: &Principal,
        context: &EvaluationContext,
    ) -> Result<BTreeSet<String>, ClientError>;
}
