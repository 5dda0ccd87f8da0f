//! Deployment manifest types.
//!
//! A [`Deployment`] serializes to the YAML config accepted by
//! `gcloud deployment-manager deployments create|update --config`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A single deployment: template imports plus resources to provision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    /// Templates referenced by resource types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,
    /// Resources, in declaration order
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A deployment manager template import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Path of the imported template
    pub path: String,
}

/// A resource to deploy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique name within the deployment
    pub name: String,
    /// Resource type (e.g. `storage.v1.bucket` or an imported template)
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Type-specific properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
    /// Extra metadata such as explicit dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Resource metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Names of resources in the same deployment that must exist first
    #[serde(
        rename = "dependsOn",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub depends_on: Vec<String>,
}

impl Deployment {
    /// Create an empty deployment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import.
    pub fn with_import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(Import { path: path.into() });
        self
    }

    /// Add a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Find a resource by name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Serialize to the deployment manager YAML config format.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(Error::Marshal)
    }

    /// Parse a deployment from YAML.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).map_err(Error::ParseManifest)
    }

    /// Read and parse a deployment YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ReadManifest {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }
}

impl Resource {
    /// Create a resource with no properties.
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            properties: BTreeMap::new(),
            metadata: None,
        }
    }

    /// Set a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Declare a dependency on another resource in the same deployment.
    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::default)
            .depends_on
            .push(name.into());
        self
    }
}

/// Entry of `deployments list --format json`. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentInfo {
    /// Deployment name
    pub name: String,
}

/// How an upsert applies a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertDecision {
    /// The deployment does not exist yet
    Create,
    /// The deployment exists; resources dropped from the manifest are
    /// abandoned rather than deleted
    UpdateAbandon,
}

impl UpsertDecision {
    /// Decide based on whether the deployment already exists.
    pub fn from_exists(exists: bool) -> Self {
        if exists {
            Self::UpdateAbandon
        } else {
            Self::Create
        }
    }

    /// `deployments` subcommand arguments for this decision.
    pub fn args(&self, name: &str) -> Vec<String> {
        match self {
            Self::Create => vec!["create".to_string(), name.to_string()],
            Self::UpdateAbandon => vec![
                "update".to_string(),
                name.to_string(),
                "--delete-policy".to_string(),
                "ABANDON".to_string(),
            ],
        }
    }
}

impl fmt::Display for UpsertDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::UpdateAbandon => write!(f, "update (delete policy ABANDON)"),
        }
    }
}
