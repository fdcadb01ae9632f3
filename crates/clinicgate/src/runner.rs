//! The pipeline state machine.
//!
//! Stages are strictly sequential: a stage method refuses to run unless the
//! pipeline is in the stage directly before it, and any failure parks the
//! pipeline in `Failed`. Checks are issued one at a time even though they
//! are independent, to keep the report ordering deterministic.

use crate::report::{AssertionOutcome, AssertionResult, VerificationReport};
use clinicgate_client::{ClientError, DecisionService};
use clinicgate_scenario::{ScenarioConfig, VerificationPlan};
use clinicgate_types::{EvaluationContext, ModelId, RelationTuple, StoreId};
use thiserror::Error;
use tracing::{info, warn};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NotStarted,
    StoreReady,
    ModelInstalled,
    TuplesWritten,
    Verified,
    Failed,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("pipeline is in stage {actual:?}, but {operation} requires {required:?}")]
    OutOfOrder {
        operation: &'static str,
        required: Stage,
        actual: Stage,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// One verification run against a decision service.
///
/// The store and model identifiers are set once by their stages and read
/// thereafter; nothing in the pipeline mutates them after `ModelInstalled`.
pub struct VerificationRun<'a, S: DecisionService> {
    service: &'a S,
    stage: Stage,
}

impl<'a, S: DecisionService> VerificationRun<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            stage: Stage::NotStarted,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn require(&self, operation: &'static str, required: Stage) -> Result<(), RunError> {
        if self.stage == required {
            Ok(())
        } else {
            Err(RunError::OutOfOrder {
                operation,
                required,
                actual: self.stage,
            })
        }
    }

    /// Stage 1: reuse a pinned store or create a fresh one.
    ///
    /// With a pinned id no create request is issued at all, which is what
    /// makes re-runs against an existing store safe.
    pub fn ensure_store(
        &mut self,
        pinned: Option<StoreId>,
        store_name: &str,
    ) -> Result<StoreId, RunError> {
        self.require("ensure_store", Stage::NotStarted)?;
        let store = match pinned {
            Some(store) => {
                info!(%store, "using pinned store");
                store
            }
            None => {
                let store = self.service.create_store(store_name).map_err(|e| {
                    self.stage = Stage::Failed;
                    e
                })?;
                info!(%store, name = store_name, "created store");
                store
            }
        };
        self.stage = Stage::StoreReady;
        Ok(store)
    }

    /// Stage 2: install the authorization model document.
    pub fn install_model(
        &mut self,
        store: &StoreId,
        model_document: &serde_json::Value,
    ) -> Result<ModelId, RunError> {
        self.require("install_model", Stage::StoreReady)?;
        let model = self
            .service
            .write_authorization_model(store, model_document)
            .map_err(|e| {
                self.stage = Stage::Failed;
                e
            })?;
        info!(%model, "authorization model installed");
        self.stage = Stage::ModelInstalled;
        Ok(model)
    }

    /// Stage 3: write the tuple set under the duplicate-skip policy.
    pub fn write_tuples(
        &mut self,
        store: &StoreId,
        model: &ModelId,
        tuples: &[RelationTuple],
    ) -> Result<(), RunError> {
        self.require("write_tuples", Stage::ModelInstalled)?;
        self.service.write_tuples(store, model, tuples).map_err(|e| {
            self.stage = Stage::Failed;
            e
        })?;
        info!(count = tuples.len(), "relation tuples written");
        self.stage = Stage::TuplesWritten;
        Ok(())
    }

    /// Stage 4: execute the plan's queries in order and compare each result
    /// to its documented expectation.
    ///
    /// A mismatched decision is recorded and the remaining assertions still
    /// run, so the report shows the full picture. A decision-service error
    /// is fatal: it is recorded and the remaining queries are skipped,
    /// since their results could not be trusted anyway.
    pub fn verify(
        &mut self,
        store: &StoreId,
        model: &ModelId,
        scenario: &ScenarioConfig,
        plan: &VerificationPlan,
    ) -> Result<VerificationReport, RunError> {
        self.require("verify", Stage::TuplesWritten)?;
        let context = EvaluationContext::at(scenario.reference);
        let mut report = VerificationReport::default();
        let mut aborted = false;

        for check in &plan.checks {
            let query = format!("check({}, {}, {})", check.user, check.relation, check.object);
            let outcome = match self.service.check(
                store,
                model,
                &check.user,
                check.relation,
                &check.object,
                &context,
            ) {
                Ok(allowed) if allowed == check.expect_allowed => AssertionOutcome::Pass,
                Ok(allowed) => AssertionOutcome::MismatchedDecision {
                    expected: check.expect_allowed,
                    actual: allowed,
                },
                Err(e) => {
                    aborted = true;
                    AssertionOutcome::Error(e)
                }
            };
            if !outcome.is_pass() {
                warn!(%query, %outcome, "assertion did not pass");
            }
            report.results.push(AssertionResult {
                label: check.label,
                query,
                outcome,
            });
            if aborted {
                break;
            }
        }

        if !aborted {
            for lo in &plan.list_objects {
                let query = format!(
                    "list_objects({}, {}, {})",
                    lo.user, lo.relation, lo.object_type
                );
                let outcome = match self.service.list_objects(
                    store,
                    model,
                    lo.object_type,
                    lo.relation,
                    &lo.user,
                    &context,
                ) {
                    Ok(objects) if objects.contains(&lo.must_contain) => AssertionOutcome::Pass,
                    Ok(objects) => AssertionOutcome::MissingObject {
                        expected: lo.must_contain.clone(),
                        actual: objects,
                    },
                    Err(e) => {
                        aborted = true;
                        AssertionOutcome::Error(e)
                    }
                };
                if !outcome.is_pass() {
                    warn!(%query, %outcome, "assertion did not pass");
                }
                report.results.push(AssertionResult {
                    label: lo.label,
                    query,
                    outcome,
                });
                if aborted {
                    break;
                }
            }
        }

        self.stage = if report.verified() {
            Stage::Verified
        } else {
            Stage::Failed
        };
        info!(
            passed = report.passed(),
            mismatched = report.mismatched(),
            errored = report.errored(),
            stage = ?self.stage,
            "verification complete"
        );
        Ok(report)
    }
}
