//! Resolving the loaded configuration into an immutable scenario.
//!
//! The resolver turns string ids from [`ClinicgateConfig`] into typed
//! principals and objects, and computes the two condition windows relative
//! to an explicit reference instant (never a wall-clock read of its own).

use crate::error::ScenarioError;
use chrono::{DateTime, Duration, Utc};
use clinicgate_config::ClinicgateConfig;
use clinicgate_types::{ObjectRef, ObjectType, Principal, TimeWindow};

/// The ten clinic principals, one per role.
#[derive(Debug, Clone)]
pub struct ScenarioPrincipals {
    pub owner: Principal,
    pub dentist_internal: Principal,
    pub dentist_external: Principal,
    pub hygienist_internal: Principal,
    pub hygienist_external: Principal,
    pub aso: Principal,
    pub reception: Principal,
    pub office_manager: Principal,
    pub agent: Principal,
    pub tech_support: Principal,
}

/// The scenario's resource graph objects.
#[derive(Debug, Clone)]
pub struct ScenarioObjects {
    pub clinic: ObjectRef,
    pub patient: ObjectRef,
    pub appointment: ObjectRef,
    pub clinical_record: ObjectRef,
    pub admin_record: ObjectRef,
    pub inventory_item: ObjectRef,
}

/// An immutable, fully resolved scenario: typed ids, computed windows, and
/// the reference instant every derived artifact is anchored to.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub principals: ScenarioPrincipals,
    pub objects: ScenarioObjects,
    /// Long-lived internal-care window (default: reference - 30d .. + 365d).
    pub internal_window: TimeWindow,
    /// Short appointment window (default: reference - 1h .. + 2h).
    pub appointment_window: TimeWindow,
    /// The instant checks are evaluated at.
    pub reference: DateTime<Utc>,
}

impl ScenarioConfig {
    /// Resolves the scenario from loaded configuration and a reference
    /// instant captured once by the caller.
    pub fn resolve(
        config: &ClinicgateConfig,
        reference: DateTime<Utc>,
    ) -> Result<Self, ScenarioError> {
        let p = &config.principals;
        let principals = ScenarioPrincipals {
            owner: Principal::new(&p.owner),
            dentist_internal: Principal::new(&p.dentist_internal),
            dentist_external: Principal::new(&p.dentist_external),
            hygienist_internal: Principal::new(&p.hygienist_internal),
            hygienist_external: Principal::new(&p.hygienist_external),
            aso: Principal::new(&p.aso),
            reception: Principal::new(&p.reception),
            office_manager: Principal::new(&p.office_manager),
            agent: Principal::new(&p.agent),
            tech_support: Principal::new(&p.tech_support),
        };

        let o = &config.objects;
        let objects = ScenarioObjects {
            clinic: ObjectRef::new(ObjectType::Clinic, &o.clinic),
            patient: ObjectRef::new(ObjectType::Patient, &o.patient),
            appointment: ObjectRef::new(ObjectType::Appointment, &o.appointment),
            clinical_record: ObjectRef::new(ObjectType::ClinicalRecord, &o.clinical_record),
            admin_record: ObjectRef::new(ObjectType::AdminRecord, &o.admin_record),
            inventory_item: ObjectRef::new(ObjectType::InventoryItem, &o.inventory_item),
        };

        let w = &config.windows;
        let internal_window = TimeWindow::new(
            resolve_bound(
                "windows.internal_start",
                w.internal_start.as_deref(),
                reference - Duration::days(30),
            )?,
            resolve_bound(
                "windows.internal_end",
                w.internal_end.as_deref(),
                reference + Duration::days(365),
            )?,
        );
        let appointment_window = TimeWindow::new(
            resolve_bound(
                "windows.appointment_start",
                w.appointment_start.as_deref(),
                reference - Duration::hours(1),
            )?,
            resolve_bound(
                "windows.appointment_end",
                w.appointment_end.as_deref(),
                reference + Duration::hours(2),
            )?,
        );

        if internal_window.end < internal_window.start {
            return Err(ScenarioError::InvertedWindow("internal"));
        }
        if appointment_window.end < appointment_window.start {
            return Err(ScenarioError::InvertedWindow("appointment"));
        }

        Ok(Self {
            principals,
            objects,
            internal_window,
            appointment_window,
            reference,
        })
    }
}

fn resolve_bound(
    field: &'static str,
    override_value: Option<&str>,
    default: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScenarioError> {
    match override_value {
        None => Ok(default),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|source| ScenarioError::InvalidWindowOverride {
                field,
                value: raw.to_string(),
                source,
            }),
    }
}
