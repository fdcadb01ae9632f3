//! Configuration loader with multi-source merging

use crate::ClinicgateConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "CLG".to_string(),
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "CLG")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<ClinicgateConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = ClinicgateConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Project config (clinicgate.toml)
        let project_config_file = self.project_dir.join("clinicgate.toml");
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 3. Local config (clinicgate.local.toml, gitignored)
        let local_config_file = self.project_dir.join("clinicgate.local.toml");
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Environment variables (CLG_*). Nesting uses a double
        // underscore (CLG_SERVICE__STORE_ID -> service.store_id) so field
        // names that themselves contain underscores survive the split.
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        let clinicgate_config: ClinicgateConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(clinicgate_config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default(self) -> ClinicgateConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .load()
            .expect("Failed to load config");

        assert_eq!(config.service.api_url, "http://localhost:8080");
        assert_eq!(config.objects.clinic, "clinicA");
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        let config_content = r#"
[service]
api_url = "http://fga.internal:8080"
store_name = "clinic-staging"

[objects]
clinic = "clinicB"

[windows]
appointment_start = "2025-06-15T11:00:00Z"
"#;
        fs::write(project_dir.join("clinicgate.toml"), config_content)
            .expect("Failed to write config");

        let config = ConfigLoader::new()
            .with_project_dir(project_dir)
            .load()
            .expect("Failed to load config");

        assert_eq!(config.service.api_url, "http://fga.internal:8080");
        assert_eq!(config.service.store_name, "clinic-staging");
        assert_eq!(config.objects.clinic, "clinicB");
        // Untouched sections keep their defaults
        assert_eq!(config.objects.patient, "pat1");
        assert_eq!(
            config.windows.appointment_start.as_deref(),
            Some("2025-06-15T11:00:00Z")
        );
    }

    #[test]
    fn test_local_overrides() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("clinicgate.toml"),
            r#"
[service]
api_url = "http://fga.internal:8080"
"#,
        )
        .expect("Failed to write project config");

        fs::write(
            project_dir.join("clinicgate.local.toml"),
            r#"
[service]
api_url = "http://localhost:9999"
"#,
        )
        .expect("Failed to write local config");

        let config = ConfigLoader::new()
            .with_project_dir(project_dir)
            .load()
            .expect("Failed to load config");

        // Local config should override project config
        assert_eq!(config.service.api_url, "http://localhost:9999");
    }

    // Env tests get a unique prefix each so parallel test threads cannot
    // see one another's variables.

    #[test]
    fn test_env_override_with_underscored_field() {
        std::env::set_var("CLGLOADERTEST_SERVICE__STORE_ID", "01JJPINNED");
        std::env::set_var("CLGLOADERTEST_OBJECTS__CLINIC", "clinicZ");

        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .with_env_prefix("CLGLOADERTEST")
            .load()
            .expect("Failed to load config");

        std::env::remove_var("CLGLOADERTEST_SERVICE__STORE_ID");
        std::env::remove_var("CLGLOADERTEST_OBJECTS__CLINIC");

        assert_eq!(config.service.store_id.as_deref(), Some("01JJPINNED"));
        assert_eq!(config.objects.clinic, "clinicZ");
    }

    #[test]
    fn test_env_overrides_beat_config_files() {
        std::env::set_var("CLGLOADERENV_SERVICE__API_URL", "http://10.0.0.1:8080");

        let temp_dir = tempdir().expect("Failed to create temp dir");
        fs::write(
            temp_dir.path().join("clinicgate.toml"),
            r#"
[service]
api_url = "http://fga.internal:8080"
"#,
        )
        .expect("Failed to write project config");

        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .with_env_prefix("CLGLOADERENV")
            .load()
            .expect("Failed to load config");

        std::env::remove_var("CLGLOADERENV_SERVICE__API_URL");

        assert_eq!(config.service.api_url, "http://10.0.0.1:8080");
    }
}
