//! Infrastructure config consumed by the rule generators
//!
//! ```yaml
//! forseti:
//!   service_bucket: gs://my-forseti-bucket
//! scanners:
//!   bucket:
//!     - name: Disallow all acl rules, only allow IAM.
//!       bucket: '*'
//!   lien:
//!     - name: Require project deletion liens for all projects.
//!       mode: required
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfraConfig {
    /// Forseti deployment; rule generation requires it
    #[serde(default)]
    pub forseti: Option<ForsetiConfig>,

    /// Declared rule records per scanner category, order preserved
    #[serde(default)]
    pub scanners: Mapping,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForsetiConfig {
    /// Bucket the Forseti server reads its rules from (gs://...)
    #[serde(default)]
    pub service_bucket: Option<String>,
}

impl InfraConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Declared value for a scanner category, if any
    pub fn scanner(&self, category: &str) -> Option<&Value> {
        self.scanners.get(category)
    }

    /// Scanner categories in the config that are not in `known`
    pub fn unknown_scanners(&self, known: &[&str]) -> Vec<String> {
        self.scanners
            .keys()
            .map(|k| match k.as_str() {
                Some(s) => s.to_string(),
                None => format!("{k:?}"),
            })
            .filter(|k| !known.contains(&k.as_str()))
            .collect()
    }

    /// Where rules go when no output path is given
    pub fn default_output_path(&self) -> Option<&str> {
        self.forseti.as_ref()?.service_bucket.as_deref()
    }
}
