//! Request/response payloads, one pair per decision-service operation.
//!
//! Shapes follow the OpenFGA HTTP API. Responses tolerate the field-name
//! variants the service is known to emit (`authorization_model_id` vs
//! `authorizationModelId`, store id at the top level vs nested).

use clinicgate_types::{
    EvaluationContext, ModelId, ObjectRef, ObjectType, Principal, Relation, RelationTuple, StoreId,
    Subject,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Create store
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateStoreRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoreResponse {
    #[serde(default)]
    id: Option<StoreId>,
    #[serde(default)]
    store: Option<StoreEnvelope>,
}

#[derive(Debug, Clone, Deserialize)]
struct StoreEnvelope {
    id: StoreId,
}

impl CreateStoreResponse {
    /// The new store's id, wherever the service put it.
    pub fn into_store_id(self) -> Option<StoreId> {
        self.id.or_else(|| self.store.map(|s| s.id))
    }
}

// ============================================================================
// Write authorization model
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WriteModelResponse {
    #[serde(alias = "authorizationModelId")]
    pub authorization_model_id: ModelId,
}

// ============================================================================
// Write tuples
// ============================================================================

/// Duplicate handling for tuple writes. `Ignore` makes re-submitting an
/// existing tuple a no-op, which is what keeps re-runs idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDuplicate {
    Ignore,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct WriteTuplesRequest {
    pub authorization_model_id: ModelId,
    pub writes: TupleWrites,
}

#[derive(Debug, Clone, Serialize)]
pub struct TupleWrites {
    pub on_duplicate: OnDuplicate,
    pub tuple_keys: Vec<RelationTuple>,
}

impl WriteTuplesRequest {
    pub fn skip_duplicates(model: ModelId, tuples: Vec<RelationTuple>) -> Self {
        Self {
            authorization_model_id: model,
            writes: TupleWrites {
                on_duplicate: OnDuplicate::Ignore,
                tuple_keys: tuples,
            },
        }
    }
}

// ============================================================================
// Check
// ============================================================================

/// The unconditioned `(user, relation, object)` key of a check.
#[derive(Debug, Clone, Serialize)]
pub struct TupleKey {
    pub user: Subject,
    pub relation: Relation,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckRequest {
    pub authorization_model_id: ModelId,
    pub tuple_key: TupleKey,
    pub context: EvaluationContext,
}

impl CheckRequest {
    pub fn new(
        model: ModelId,
        user: Principal,
        relation: Relation,
        object: ObjectRef,
        context: EvaluationContext,
    ) -> Self {
        Self {
            authorization_model_id: model,
            tuple_key: TupleKey {
                user: Subject::User(user),
                relation,
                object,
            },
            context,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub allowed: bool,
}

// ============================================================================
// List objects
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListObjectsRequest {
    pub authorization_model_id: ModelId,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub relation: Relation,
    pub user: Subject,
    pub context: EvaluationContext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListObjectsResponse {
    #[serde(default)]
    pub objects: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn write_request_carries_duplicate_skip_policy() {
        let req = WriteTuplesRequest::skip_duplicates(ModelId::new("m1"), vec![]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["writes"]["on_duplicate"], "ignore");
        assert_eq!(json["authorization_model_id"], "m1");
    }

    #[test]
    fn check_request_matches_service_shape() {
        let ctx = EvaluationContext::at(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap());
        let req = CheckRequest::new(
            ModelId::new("m1"),
            Principal::new("aso1"),
            Relation::CanRead,
            ObjectRef::new(ObjectType::ClinicalRecord, "cr1"),
            ctx,
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "authorization_model_id": "m1",
                "tuple_key": {
                    "user": "user:aso1",
                    "relation": "can_read",
                    "object": "clinical_record:cr1",
                },
                "context": { "current_time": "2025-06-15T12:00:00Z" },
            })
        );
    }

    #[test]
    fn store_id_parses_from_either_response_shape() {
        let flat: CreateStoreResponse = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert_eq!(flat.into_store_id(), Some(StoreId::new("s1")));

        let nested: CreateStoreResponse =
            serde_json::from_str(r#"{"store": {"id": "s2"}}"#).unwrap();
        assert_eq!(nested.into_store_id(), Some(StoreId::new("s2")));

        let neither: CreateStoreResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(neither.into_store_id(), None);
    }

    #[test]
    fn model_id_accepts_camel_case_alias() {
        let resp: WriteModelResponse =
            serde_json::from_str(r#"{"authorizationModelId": "m9"}"#).unwrap();
        assert_eq!(resp.authorization_model_id, ModelId::new("m9"));
    }
}
