//! The verification plan: each query's expected outcome as data.
//!
//! The original provisioning flow printed service responses next to comments
//! describing what they should be. Here every expectation is explicit, so
//! the runner can assert instead of narrate.

use crate::resolve::ScenarioConfig;
use clinicgate_types::{ObjectRef, ObjectType, Principal, Relation};

/// A point-in-time check with its documented expected decision.
#[derive(Debug, Clone)]
pub struct CheckAssertion {
    /// Why this decision should hold; shown in the report.
    pub label: &'static str,
    pub user: Principal,
    pub relation: Relation,
    pub object: ObjectRef,
    pub expect_allowed: bool,
}

/// A list-objects query with the id it must include.
#[derive(Debug, Clone)]
pub struct ListObjectsAssertion {
    pub label: &'static str,
    pub user: Principal,
    pub relation: Relation,
    pub object_type: ObjectType,
    /// Full `<type>:<id>` identifier the result set must contain.
    pub must_contain: String,
}

/// The ordered, deterministic query sequence for one verification run.
#[derive(Debug, Clone)]
pub struct VerificationPlan {
    pub checks: Vec<CheckAssertion>,
    pub list_objects: Vec<ListObjectsAssertion>,
}

impl VerificationPlan {
    /// Total number of assertions in the plan.
    pub fn len(&self) -> usize {
        self.checks.len() + self.list_objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty() && self.list_objects.is_empty()
    }
}

/// Builds the verification plan for the clinic scenario.
///
/// The expectations document the policy's intent at the evaluation instant
/// (which lies inside both condition windows by construction):
/// direct role grants, read-only role separation, the transitive
/// appointment-window grant, and scope isolation for the external agent.
pub fn verification_plan(scenario: &ScenarioConfig) -> VerificationPlan {
    let p = &scenario.principals;
    let o = &scenario.objects;

    VerificationPlan {
        checks: vec![
            CheckAssertion {
                label: "internal dentist reads clinical record (role + hierarchy)",
                user: p.dentist_internal.clone(),
                relation: Relation::CanRead,
                object: o.clinical_record.clone(),
                expect_allowed: true,
            },
            CheckAssertion {
                label: "administrative support reads clinical record (read-only role)",
                user: p.aso.clone(),
                relation: Relation::CanRead,
                object: o.clinical_record.clone(),
                expect_allowed: true,
            },
            CheckAssertion {
                label: "administrative support cannot write clinical record",
                user: p.aso.clone(),
                relation: Relation::CanWrite,
                object: o.clinical_record.clone(),
                expect_allowed: false,
            },
            CheckAssertion {
                label: "external dentist writes clinical record via appointment window",
                user: p.dentist_external.clone(),
                relation: Relation::CanWrite,
                object: o.clinical_record.clone(),
                expect_allowed: true,
            },
            CheckAssertion {
                label: "external agent cannot read admin record",
                user: p.agent.clone(),
                relation: Relation::CanRead,
                object: o.admin_record.clone(),
                expect_allowed: false,
            },
            CheckAssertion {
                label: "external agent writes inventory item",
                user: p.agent.clone(),
                relation: Relation::CanWrite,
                object: o.inventory_item.clone(),
                expect_allowed: true,
            },
        ],
        list_objects: vec![ListObjectsAssertion {
            label: "internal dentist's readable clinical records include the scenario record",
            user: p.dentist_internal.clone(),
            relation: Relation::CanRead,
            object_type: ObjectType::ClinicalRecord,
            must_contain: o.clinical_record.to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clinicgate_config::ClinicgateConfig;

    fn plan() -> VerificationPlan {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let scenario = ScenarioConfig::resolve(&ClinicgateConfig::default(), t0).unwrap();
        verification_plan(&scenario)
    }

    #[test]
    fn plan_has_six_checks_and_one_list_query() {
        let plan = plan();
        assert_eq!(plan.checks.len(), 6);
        assert_eq!(plan.list_objects.len(), 1);
        assert_eq!(plan.len(), 7);
        assert!(!plan.is_empty());
    }

    #[test]
    fn role_separation_is_encoded_for_the_same_subject_and_object() {
        let plan = plan();
        let aso: Vec<_> = plan
            .checks
            .iter()
            .filter(|c| c.user == Principal::new("aso1"))
            .collect();
        assert_eq!(aso.len(), 2);
        assert_eq!(aso[0].object, aso[1].object);
        assert!(aso[0].expect_allowed && matches!(aso[0].relation, Relation::CanRead));
        assert!(!aso[1].expect_allowed && matches!(aso[1].relation, Relation::CanWrite));
    }

    #[test]
    fn scope_isolation_is_encoded_for_the_agent() {
        let plan = plan();
        let agent: Vec<_> = plan
            .checks
            .iter()
            .filter(|c| c.user == Principal::new("agent1"))
            .collect();
        assert_eq!(agent.len(), 2);
        assert!(!agent[0].expect_allowed, "admin record read must be denied");
        assert!(agent[1].expect_allowed, "inventory write must be allowed");
    }

    #[test]
    fn list_query_targets_the_scenario_clinical_record() {
        let plan = plan();
        assert_eq!(plan.list_objects[0].must_contain, "clinical_record:cr1");
        assert_eq!(plan.list_objects[0].object_type, ObjectType::ClinicalRecord);
    }
}
