//! Blocking HTTP implementation of [`DecisionService`].
//!
//! One POST per operation against the OpenFGA-style REST paths. Calls are
//! strictly sequential with no retry; a transport failure aborts the run.

use crate::api::{
    CheckRequest, CheckResponse, CreateStoreRequest, CreateStoreResponse, ListObjectsRequest,
    ListObjectsResponse, WriteModelResponse, WriteTuplesRequest,
};
use crate::error::ClientError;
use crate::service::DecisionService;
use clinicgate_types::{
    EvaluationContext, ModelId, ObjectRef, ObjectType, Principal, Relation, RelationTuple, StoreId,
    Subject,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use tracing::debug;

/// Blocking client for an OpenFGA-compatible decision service.
pub struct HttpDecisionService {
    base_url: String,
    token: Option<String>,
    http: reqwest::blocking::Client,
}

impl HttpDecisionService {
    /// Connects to the service at `base_url`, optionally with a bearer
    /// credential. Trailing slashes on the URL are tolerated.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Sends one POST and returns the successful response body as text.
    fn send<B: Serialize>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<String, ClientError> {
        let url = format!("{}{path}", self.base_url);
        debug!(operation, %url, "decision service request");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Service {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .map_err(|source| ClientError::Transport { operation, source })
    }

    fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let text = self.send(operation, path, body)?;
        parse_json(operation, &text)
    }
}

fn parse_json<R: DeserializeOwned>(operation: &'static str, body: &str) -> Result<R, ClientError> {
    serde_json::from_str(body).map_err(|source| ClientError::MalformedResponse {
        operation,
        reason: source.to_string(),
    })
}

/// Accepts the write acknowledgment: the service sends `{}`, but an entirely
/// empty body also counts as success.
fn validate_ack(operation: &'static str, body: &str) -> Result<(), ClientError> {
    if body.trim().is_empty() {
        return Ok(());
    }
    let _: serde_json::Value = parse_json(operation, body)?;
    Ok(())
}

impl DecisionService for HttpDecisionService {
    fn create_store(&self, name: &str) -> Result<StoreId, ClientError> {
        let response: CreateStoreResponse = self.post(
            "create_store",
            "/stores",
            &CreateStoreRequest {
                name: name.to_string(),
            },
        )?;
        response
            .into_store_id()
            .ok_or_else(|| ClientError::MalformedResponse {
                operation: "create_store",
                reason: "no store id in response".to_string(),
            })
    }

    fn write_authorization_model(
        &self,
        store: &StoreId,
        model: &serde_json::Value,
    ) -> Result<ModelId, ClientError> {
        let path = format!("/stores/{store}/authorization-models");
        let response: WriteModelResponse = self.post("write_authorization_model", &path, model)?;
        Ok(response.authorization_model_id)
    }

    fn write_tuples(
        &self,
        store: &StoreId,
        model: &ModelId,
        tuples: &[RelationTuple],
    ) -> Result<(), ClientError> {
        let path = format!("/stores/{store}/write");
        let request = WriteTuplesRequest::skip_duplicates(model.clone(), tuples.to_vec());
        let ack = self.send("write_tuples", &path, &request)?;
        validate_ack("write_tuples", &ack)
    }

    fn check(
        &self,
        store: &StoreId,
        model: &ModelId,
        user: &Principal,
        relation: Relation,
        object: &ObjectRef,
        context: &EvaluationContext,
    ) -> Result<bool, ClientError> {
        let path = format!("/stores/{store}/check");
        let request = CheckRequest::new(
            model.clone(),
            user.clone(),
            relation,
            object.clone(),
            *context,
        );
        let response: CheckResponse = self.post("check", &path, &request)?;
        Ok(response.allowed)
    }

    fn list_objects(
        &self,
        store: &StoreId,
        model: &ModelId,
        object_type: ObjectType,
        relation: Relation,
        user: &Principal,
        context: &EvaluationContext,
    ) -> Result<BTreeSet<String>, ClientError> {
        let path = format!("/stores/{store}/list-objects");
        let request = ListObjectsRequest {
            authorization_model_id: model.clone(),
            object_type,
            relation,
            user: Subject::User(user.clone()),
            context: *context,
        };
        let response: ListObjectsResponse = self.post("list_objects", &path, &request)?;
        Ok(response.objects.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = HttpDecisionService::new("http://localhost:8080/", None);
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn write_ack_accepts_empty_body() {
        assert!(validate_ack("write_tuples", "").is_ok());
        assert!(validate_ack("write_tuples", "  \n").is_ok());
    }

    #[test]
    fn write_ack_accepts_json_body() {
        assert!(validate_ack("write_tuples", "{}").is_ok());
    }

    #[test]
    fn write_ack_rejects_garbage_body() {
        let err = validate_ack("write_tuples", "not json").unwrap_err();
        assert!(matches!(
            err,
            ClientError::MalformedResponse {
                operation: "write_tuples",
                ..
            }
        ));
    }

    #[test]
    fn parse_json_reports_malformed_body() {
        let err = parse_json::<CheckResponse>("check", "").unwrap_err();
        assert!(matches!(
            err,
            ClientError::MalformedResponse {
                operation: "check",
                ..
            }
        ));
    }
}
