//! Relation tuples: the facts written to the decision service.
//!
//! A tuple is `(user, relation, object)`, optionally guarded by a
//! [`Condition`]. The `user` slot holds either a principal (role
//! assignments, conditioned grants) or another object (hierarchy links,
//! e.g. `clinic:clinicA` is the `clinic` of `patient:pat1`).

use crate::condition::Condition;
use crate::identity::{IdentityError, ObjectRef, Principal};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;

// ============================================================================
// Relation
// ============================================================================

/// Every relation named by the clinic authorization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    // -- Roles, attached to the clinic object --
    /// The dentist who owns the practice.
    OwnerDentist,
    /// Staff dentist employed by the clinic.
    DentistInternal,
    /// Visiting dentist; only acts inside an appointment window.
    DentistExternal,
    HygienistInternal,
    HygienistExternal,
    /// Administrative support operator (read-only on clinical data).
    Aso,
    Reception,
    OfficeManager,
    /// External commercial agent (inventory only).
    Agent,
    TechSupport,

    // -- Hierarchy links between objects --
    Clinic,
    Patient,
    Appointment,

    // -- Conditioned grants --
    /// Internal care assignment on a patient, guarded by a long-lived window.
    CareInternal,
    /// Practitioner on an appointment, guarded by the appointment window.
    Practitioner,

    // -- Permissions queried by checks --
    CanRead,
    CanWrite,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::OwnerDentist => "owner_dentist",
            Relation::DentistInternal => "dentist_internal",
            Relation::DentistExternal => "dentist_external",
            Relation::HygienistInternal => "hygienist_internal",
            Relation::HygienistExternal => "hygienist_external",
            Relation::Aso => "aso",
            Relation::Reception => "reception",
            Relation::OfficeManager => "office_manager",
            Relation::Agent => "agent",
            Relation::TechSupport => "tech_support",
            Relation::Clinic => "clinic",
            Relation::Patient => "patient",
            Relation::Appointment => "appointment",
            Relation::CareInternal => "care_internal",
            Relation::Practitioner => "practitioner",
            Relation::CanRead => "can_read",
            Relation::CanWrite => "can_write",
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Relation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "owner_dentist" => Ok(Relation::OwnerDentist),
            "dentist_internal" => Ok(Relation::DentistInternal),
            "dentist_external" => Ok(Relation::DentistExternal),
            "hygienist_internal" => Ok(Relation::HygienistInternal),
            "hygienist_external" => Ok(Relation::HygienistExternal),
            "aso" => Ok(Relation::Aso),
            "reception" => Ok(Relation::Reception),
            "office_manager" => Ok(Relation::OfficeManager),
            "agent" => Ok(Relation::Agent),
            "tech_support" => Ok(Relation::TechSupport),
            "clinic" => Ok(Relation::Clinic),
            "patient" => Ok(Relation::Patient),
            "appointment" => Ok(Relation::Appointment),
            "care_internal" => Ok(Relation::CareInternal),
            "practitioner" => Ok(Relation::Practitioner),
            "can_read" => Ok(Relation::CanRead),
            "can_write" => Ok(Relation::CanWrite),
            other => Err(serde::de::Error::custom(format!("unknown relation {other:?}"))),
        }
    }
}

// ============================================================================
// Subject
// ============================================================================

/// The `user` slot of a tuple: a principal or another object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    User(Principal),
    Object(ObjectRef),
}

impl From<Principal> for Subject {
    fn from(p: Principal) -> Self {
        Subject::User(p)
    }
}

impl From<ObjectRef> for Subject {
    fn from(o: ObjectRef) -> Self {
        Subject::Object(o)
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::User(p) => p.fmt(f),
            Subject::Object(o) => o.fmt(f),
        }
    }
}

impl FromStr for Subject {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("user:") {
            Ok(Subject::User(s.parse()?))
        } else {
            Ok(Subject::Object(s.parse()?))
        }
    }
}

impl Serialize for Subject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// RelationTuple
// ============================================================================

/// A single relationship fact, optionally guarded by a condition.
///
/// Uniqueness key is `(user, relation, object)` for unconditioned tuples;
/// tuples differing only in condition are distinct entries. Writes use a
/// duplicate-skip policy, so re-submitting an existing tuple is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTuple {
    pub user: Subject,
    pub relation: Relation,
    pub object: ObjectRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl RelationTuple {
    /// An unconditioned fact.
    pub fn new(user: impl Into<Subject>, relation: Relation, object: ObjectRef) -> Self {
        Self {
            user: user.into(),
            relation,
            object,
            condition: None,
        }
    }

    /// A fact guarded by a condition.
    pub fn conditioned(
        user: impl Into<Subject>,
        relation: Relation,
        object: ObjectRef,
        condition: Condition,
    ) -> Self {
        Self {
            user: user.into(),
            relation,
            object,
            condition: Some(condition),
        }
    }
}

impl Display for RelationTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.user, self.relation, self.object)?;
        if let Some(cond) = &self.condition {
            let w = cond.window();
            write!(
                f,
                " if active_window[{}, {}]",
                crate::condition::iso_utc(w.start),
                crate::condition::iso_utc(w.end)
            )?;
        }
        Ok(())
    }
}
