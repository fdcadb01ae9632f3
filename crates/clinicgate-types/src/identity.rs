//! Principals, typed objects, and opaque service identifiers.
//!
//! Wire format note: the decision service addresses everything as a
//! `<namespace>:<id>` string (`user:dentistInt1`, `clinical_record:cr1`).
//! These types keep the two halves apart in Rust and only flatten to the
//! colon form at the serialization boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Failure to parse a namespaced identifier off the wire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identifier {0:?} is not in `<type>:<id>` form")]
    MissingNamespace(String),

    #[error("unknown object type {0:?}")]
    UnknownObjectType(String),

    #[error("identifier {0:?} has an empty id part")]
    EmptyId(String),
}

// ============================================================================
// Principal
// ============================================================================

/// An opaque user identity, namespaced as `user:<id>` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The bare id, without the `user:` namespace.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

impl FromStr for Principal {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .strip_prefix("user:")
            .ok_or_else(|| IdentityError::MissingNamespace(s.to_string()))?;
        if id.is_empty() {
            return Err(IdentityError::EmptyId(s.to_string()));
        }
        Ok(Self(id.to_string()))
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// ObjectType / ObjectRef
// ============================================================================

/// The object types in the clinic scenario's authorization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Clinic,
    Patient,
    Appointment,
    ClinicalRecord,
    AdminRecord,
    InventoryItem,
}

impl ObjectType {
    /// The wire name of this type (`clinical_record`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Clinic => "clinic",
            ObjectType::Patient => "patient",
            ObjectType::Appointment => "appointment",
            ObjectType::ClinicalRecord => "clinical_record",
            ObjectType::AdminRecord => "admin_record",
            ObjectType::InventoryItem => "inventory_item",
        }
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clinic" => Ok(ObjectType::Clinic),
            "patient" => Ok(ObjectType::Patient),
            "appointment" => Ok(ObjectType::Appointment),
            "clinical_record" => Ok(ObjectType::ClinicalRecord),
            "admin_record" => Ok(ObjectType::AdminRecord),
            "inventory_item" => Ok(ObjectType::InventoryItem),
            other => Err(IdentityError::UnknownObjectType(other.to_string())),
        }
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A typed, namespaced object identifier (`<type>:<id>` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    ty: ObjectType,
    id: String,
}

impl ObjectRef {
    pub fn new(ty: ObjectType, id: impl Into<String>) -> Self {
        Self { ty, id: id.into() }
    }

    pub fn object_type(&self) -> ObjectType {
        self.ty
    }

    /// The bare id, without the type namespace.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ty, self.id)
    }
}

impl FromStr for ObjectRef {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ty, id) = s
            .split_once(':')
            .ok_or_else(|| IdentityError::MissingNamespace(s.to_string()))?;
        if id.is_empty() {
            return Err(IdentityError::EmptyId(s.to_string()));
        }
        Ok(Self {
            ty: ty.parse()?,
            id: id.to_string(),
        })
    }
}

impl Serialize for ObjectRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// StoreId / ModelId
// ============================================================================

/// Opaque identifier of a tenant store, owned by the decision service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of an installed authorization model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_round_trips_through_wire_form() {
        let p = Principal::new("dentistInt1");
        assert_eq!(p.to_string(), "user:dentistInt1");
        assert_eq!("user:dentistInt1".parse::<Principal>().unwrap(), p);
    }

    #[test]
    fn principal_rejects_missing_namespace() {
        assert_eq!(
            "dentistInt1".parse::<Principal>(),
            Err(IdentityError::MissingNamespace("dentistInt1".to_string()))
        );
    }

    #[test]
    fn object_ref_round_trips_through_wire_form() {
        let o = ObjectRef::new(ObjectType::ClinicalRecord, "cr1");
        assert_eq!(o.to_string(), "clinical_record:cr1");
        assert_eq!("clinical_record:cr1".parse::<ObjectRef>().unwrap(), o);
    }

    #[test]
    fn object_ref_rejects_unknown_type() {
        assert_eq!(
            "widget:w1".parse::<ObjectRef>(),
            Err(IdentityError::UnknownObjectType("widget".to_string()))
        );
    }

    #[test]
    fn object_ref_rejects_empty_id() {
        assert!(matches!(
            "clinic:".parse::<ObjectRef>(),
            Err(IdentityError::EmptyId(_))
        ));
    }

    #[test]
    fn object_ref_serializes_as_single_string() {
        let o = ObjectRef::new(ObjectType::Patient, "pat1");
        assert_eq!(serde_json::to_string(&o).unwrap(), "\"patient:pat1\"");
    }
}
