//! The scenario builder: the canonical tuple set as pure data.

use crate::resolve::ScenarioConfig;
use clinicgate_types::{Condition, Relation, RelationTuple};

/// Builds the complete, ordered relation tuple set for the clinic scenario.
///
/// Order is deterministic: role assignments on the clinic, then hierarchy
/// links wiring each resource to the clinic (and to each other), then the
/// conditioned grants. The same `ScenarioConfig` always yields the same
/// tuples, which is what makes the builder snapshot-testable and the write
/// stage idempotent under the duplicate-skip policy.
pub fn build_tuples(scenario: &ScenarioConfig) -> Vec<RelationTuple> {
    let p = &scenario.principals;
    let o = &scenario.objects;
    let internal = Condition::ActiveWindow(scenario.internal_window);
    let appointment = Condition::ActiveWindow(scenario.appointment_window);

    vec![
        // -- Roles on the clinic --
        RelationTuple::new(p.owner.clone(), Relation::OwnerDentist, o.clinic.clone()),
        RelationTuple::new(
            p.dentist_internal.clone(),
            Relation::DentistInternal,
            o.clinic.clone(),
        ),
        RelationTuple::new(
            p.dentist_external.clone(),
            Relation::DentistExternal,
            o.clinic.clone(),
        ),
        RelationTuple::new(
            p.hygienist_internal.clone(),
            Relation::HygienistInternal,
            o.clinic.clone(),
        ),
        RelationTuple::new(
            p.hygienist_external.clone(),
            Relation::HygienistExternal,
            o.clinic.clone(),
        ),
        RelationTuple::new(p.aso.clone(), Relation::Aso, o.clinic.clone()),
        RelationTuple::new(p.reception.clone(), Relation::Reception, o.clinic.clone()),
        RelationTuple::new(
            p.office_manager.clone(),
            Relation::OfficeManager,
            o.clinic.clone(),
        ),
        RelationTuple::new(p.agent.clone(), Relation::Agent, o.clinic.clone()),
        RelationTuple::new(p.tech_support.clone(), Relation::TechSupport, o.clinic.clone()),
        // -- Hierarchy links --
        RelationTuple::new(o.clinic.clone(), Relation::Clinic, o.patient.clone()),
        RelationTuple::new(o.clinic.clone(), Relation::Clinic, o.appointment.clone()),
        RelationTuple::new(o.patient.clone(), Relation::Patient, o.appointment.clone()),
        RelationTuple::new(o.clinic.clone(), Relation::Clinic, o.clinical_record.clone()),
        RelationTuple::new(o.patient.clone(), Relation::Patient, o.clinical_record.clone()),
        RelationTuple::new(
            o.appointment.clone(),
            Relation::Appointment,
            o.clinical_record.clone(),
        ),
        RelationTuple::new(o.clinic.clone(), Relation::Clinic, o.admin_record.clone()),
        RelationTuple::new(o.clinic.clone(), Relation::Clinic, o.inventory_item.clone()),
        // -- Internal care assignments, long-lived window --
        RelationTuple::conditioned(
            p.dentist_internal.clone(),
            Relation::CareInternal,
            o.patient.clone(),
            internal.clone(),
        ),
        RelationTuple::conditioned(
            p.aso.clone(),
            Relation::CareInternal,
            o.patient.clone(),
            internal.clone(),
        ),
        RelationTuple::conditioned(
            p.office_manager.clone(),
            Relation::CareInternal,
            o.patient.clone(),
            internal,
        ),
        // -- External practitioner, appointment window --
        RelationTuple::conditioned(
            p.dentist_external.clone(),
            Relation::Practitioner,
            o.appointment.clone(),
            appointment,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clinicgate_config::ClinicgateConfig;
    use clinicgate_types::{ObjectType, Subject};

    fn scenario() -> ScenarioConfig {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        ScenarioConfig::resolve(&ClinicgateConfig::default(), t0).unwrap()
    }

    #[test]
    fn builds_twenty_two_tuples_in_canonical_order() {
        let tuples = build_tuples(&scenario());
        assert_eq!(tuples.len(), 22);
        // Roles first, then links, then conditioned grants.
        assert_eq!(tuples[0].relation, Relation::OwnerDentist);
        assert_eq!(tuples[10].relation, Relation::Clinic);
        assert_eq!(tuples[18].relation, Relation::CareInternal);
        assert_eq!(tuples[21].relation, Relation::Practitioner);
    }

    #[test]
    fn same_config_replays_to_identical_tuple_set() {
        assert_eq!(build_tuples(&scenario()), build_tuples(&scenario()));
    }

    #[test]
    fn role_tuples_attach_only_to_the_clinic() {
        let tuples = build_tuples(&scenario());
        for t in tuples.iter().take(10) {
            assert_eq!(t.object.object_type(), ObjectType::Clinic, "tuple {t}");
            assert!(matches!(t.user, Subject::User(_)), "tuple {t}");
            assert!(t.condition.is_none(), "tuple {t}");
        }
    }

    #[test]
    fn every_leaf_object_is_reachable_from_the_clinic_unconditioned() {
        let s = scenario();
        let tuples = build_tuples(&s);
        for leaf in [
            &s.objects.patient,
            &s.objects.appointment,
            &s.objects.clinical_record,
            &s.objects.admin_record,
            &s.objects.inventory_item,
        ] {
            assert!(
                tuples.iter().any(|t| t.condition.is_none()
                    && t.relation == Relation::Clinic
                    && t.object == *leaf
                    && t.user == Subject::Object(s.objects.clinic.clone())),
                "{leaf} not linked to the clinic"
            );
        }
    }

    #[test]
    fn clinical_record_is_wired_to_patient_and_appointment() {
        let s = scenario();
        let tuples = build_tuples(&s);
        let parents: Vec<_> = tuples
            .iter()
            .filter(|t| t.object == s.objects.clinical_record)
            .map(|t| (t.user.clone(), t.relation))
            .collect();
        assert_eq!(
            parents,
            vec![
                (Subject::Object(s.objects.clinic.clone()), Relation::Clinic),
                (Subject::Object(s.objects.patient.clone()), Relation::Patient),
                (
                    Subject::Object(s.objects.appointment.clone()),
                    Relation::Appointment
                ),
            ]
        );
    }

    #[test]
    fn every_conditioned_tuple_carries_an_explicit_window() {
        let s = scenario();
        for t in build_tuples(&s) {
            match t.relation {
                Relation::CareInternal => {
                    assert_eq!(t.condition.as_ref().unwrap().window(), &s.internal_window);
                }
                Relation::Practitioner => {
                    assert_eq!(
                        t.condition.as_ref().unwrap().window(),
                        &s.appointment_window
                    );
                }
                _ => assert!(t.condition.is_none(), "unexpected condition on {t}"),
            }
        }
    }

    #[test]
    fn tuple_set_snapshot_matches_wire_shape() {
        let tuples = build_tuples(&scenario());
        let json = serde_json::to_value(&tuples).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({
                "user": "user:owner1",
                "relation": "owner_dentist",
                "object": "clinic:clinicA",
            })
        );
        assert_eq!(
            json[21],
            serde_json::json!({
                "user": "user:dentistExt1",
                "relation": "practitioner",
                "object": "appointment:appt1",
                "condition": {
                    "name": "active_window",
                    "context": {
                        "start_time": "2025-06-15T11:00:00Z",
                        "end_time": "2025-06-15T14:00:00Z",
                    }
                }
            })
        );
    }
}
