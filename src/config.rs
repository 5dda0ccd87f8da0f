//! Tool settings from `<config_dir>/config.toml`
//!
//! ```toml
//! gcloud = "gcloud"
//! gsutil = "gsutil"
//! default_project = "my-project"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::paths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Provider CLI used for deployment manager commands
    #[serde(default = "default_gcloud")]
    pub gcloud: String,

    /// Storage CLI used to copy rules to GCS
    #[serde(default = "default_gsutil")]
    pub gsutil: String,

    /// Project used when `--project` is not given
    #[serde(default)]
    pub default_project: Option<String>,
}

fn default_gcloud() -> String {
    deploymentmanager::DEFAULT_CLI.to_string()
}

fn default_gsutil() -> String {
    rulegen::writer::DEFAULT_STORAGE_CLI.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gcloud: default_gcloud(),
            gsutil: default_gsutil(),
            default_project: None,
        }
    }
}

impl Settings {
    /// Load settings from the config directory, or defaults if absent
    pub fn load() -> Result<Self> {
        let path = paths::config_dir()?.join("config.toml");
        Self::load_from(&path)
    }

    /// Load settings from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolve the project from a flag, falling back to `default_project`
    pub fn project(&self, flag: Option<String>) -> Result<String> {
        flag.or_else(|| self.default_project.clone()).context(
            "No project given. Pass --project, set DEPLOYCTL_PROJECT, or set default_project in config.toml",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.gcloud, "gcloud");
        assert_eq!(settings.gsutil, "gsutil");
    }

    #[test]
    fn test_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "default_project = \"my-project\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.default_project.as_deref(), Some("my-project"));
        assert_eq!(settings.gcloud, "gcloud");
    }

    #[test]
    fn test_invalid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "gcloud = [").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_project_resolution() {
        let settings = Settings {
            default_project: Some("fallback".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.project(Some("flag".into())).unwrap(), "flag");
        assert_eq!(settings.project(None).unwrap(), "fallback");
        assert!(Settings::default().project(None).is_err());
    }
}
