//! Configuration management for Clinicgate
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (CLG_* prefix, highest precedence; a double
//!    underscore separates section from field, `CLG_SERVICE__STORE_ID`)
//! 2. clinicgate.local.toml (gitignored, local overrides)
//! 3. clinicgate.toml (git-tracked, project config)
//! 4. Built-in defaults (lowest precedence)
//!
//! The resolved [`ClinicgateConfig`] is assembled once at startup and passed
//! into the scenario builder and verification runner; no other component
//! performs its own environment lookups.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

/// Main Clinicgate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicgateConfig {
    pub service: ServiceConfig,
    pub principals: PrincipalsConfig,
    pub objects: ObjectsConfig,
    pub windows: WindowsConfig,
}

impl ClinicgateConfig {
    /// Checks the invariants a run depends on before any network call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.api_url must not be empty".to_string(),
            ));
        }
        if self.service.store_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.store_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Decision-service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the decision service API.
    pub api_url: String,
    /// Optional bearer credential sent with every request.
    pub api_token: Option<String>,
    /// Path to the authorization model document (JSON).
    pub model_file: PathBuf,
    /// Store name used when a new store has to be created.
    pub store_name: String,
    /// Pinned store id. When set, store creation is skipped and the run
    /// resumes against this store.
    pub store_id: Option<String>,
    /// Path of the state file recording resolved store/model ids.
    pub state_file: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            api_token: None,
            model_file: PathBuf::from("model/crm_model.generated.json"),
            store_name: "crm-odontoiatrico-demo".to_string(),
            store_id: None,
            state_file: PathBuf::from(".clinicgate-state"),
        }
    }
}

/// Principal ids for the ten clinic roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrincipalsConfig {
    pub owner: String,
    pub dentist_internal: String,
    pub dentist_external: String,
    pub hygienist_internal: String,
    pub hygienist_external: String,
    pub aso: String,
    pub reception: String,
    pub office_manager: String,
    pub agent: String,
    pub tech_support: String,
}

impl Default for PrincipalsConfig {
    fn default() -> Self {
        Self {
            owner: "owner1".to_string(),
            dentist_internal: "dentistInt1".to_string(),
            dentist_external: "dentistExt1".to_string(),
            hygienist_internal: "hygInt1".to_string(),
            hygienist_external: "hygExt1".to_string(),
            aso: "aso1".to_string(),
            reception: "reception1".to_string(),
            office_manager: "officeMgr1".to_string(),
            agent: "agent1".to_string(),
            tech_support: "tech1".to_string(),
        }
    }
}

/// Object ids for the scenario's resource graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectsConfig {
    pub clinic: String,
    pub patient: String,
    pub appointment: String,
    pub clinical_record: String,
    pub admin_record: String,
    pub inventory_item: String,
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            clinic: "clinicA".to_string(),
            patient: "pat1".to_string(),
            appointment: "appt1".to_string(),
            clinical_record: "cr1".to_string(),
            admin_record: "ar1".to_string(),
            inventory_item: "item1".to_string(),
        }
    }
}

/// Optional ISO-8601 overrides for the two condition windows.
///
/// Left unset, the windows are derived from the run's reference instant:
/// internal care spans 30 days before to 365 days after, the appointment
/// window one hour before to two hours after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowsConfig {
    pub internal_start: Option<String>,
    pub internal_end: Option<String>,
    pub appointment_start: Option<String>,
    pub appointment_end: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scenario_conventions() {
        let config = ClinicgateConfig::default();
        assert_eq!(config.service.store_name, "crm-odontoiatrico-demo");
        assert_eq!(config.principals.dentist_internal, "dentistInt1");
        assert_eq!(config.objects.clinical_record, "cr1");
        assert!(config.windows.internal_start.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_api_url_fails_validation() {
        let mut config = ClinicgateConfig::default();
        config.service.api_url = String::new();
        assert!(config.validate().is_err());
    }
}
