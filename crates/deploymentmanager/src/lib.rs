//! # deploymentmanager
//!
//! Create-or-update of GCP Deployment Manager deployments through `gcloud`.
//!
//! [`Client::upsert`] looks up the deployment by name first. A new deployment
//! is created; an existing one is updated with `--delete-policy ABANDON`, so
//! resources removed from the manifest are detached from the deployment but
//! never deleted. Cleaning them up stays a manual decision.
//!
//! ## Example
//!
//! ```no_run
//! use deploymentmanager::{Client, Deployment, Resource};
//!
//! let deployment = Deployment::new().with_resource(
//!     Resource::new("my-bucket", "storage.v1.bucket").with_property("location", "US"),
//! );
//!
//! let client = Client::new();
//! client.upsert("data-buckets", &deployment, "my-project").expect("deploy failed");
//! ```
//!
//! ## Testing
//!
//! Inject a [`cmdexec::MockRunner`] with [`Client::with_runner`] to observe
//! the issued commands without calling `gcloud`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Deployment, DeploymentInfo, Import, Metadata, Resource, UpsertDecision};

use cmdexec::{CommandLine, Runner, SystemRunner};
use std::io::Write;
use std::path::Path;

/// Default provider CLI.
pub const DEFAULT_CLI: &str = "gcloud";

/// Client for deployment manager operations.
pub struct Client {
    runner: Box<dyn Runner>,
    cli: String,
}

impl Client {
    /// Create a client that runs the real `gcloud` CLI.
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemRunner::new()))
    }

    /// Create a client with a custom runner (useful for testing).
    pub fn with_runner(runner: Box<dyn Runner>) -> Self {
        Self {
            runner,
            cli: DEFAULT_CLI.to_string(),
        }
    }

    /// Use a different `gcloud` executable.
    pub fn cli(mut self, cli: impl Into<String>) -> Self {
        self.cli = cli.into();
        self
    }

    fn deployments_cmd(&self) -> CommandLine {
        CommandLine::new(&self.cli).args(["deployment-manager", "deployments"])
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// List the deployments in a project.
    pub fn list_deployments(&self, project: &str) -> Result<Vec<DeploymentInfo>> {
        let cmd = self
            .deployments_cmd()
            .args(["list", "--format", "json", "--project", project]);

        let output = self
            .runner
            .combined_output(&cmd)
            .map_err(|e| Error::ListDeployments {
                project: project.to_string(),
                source: e,
            })?;

        let deployments: Vec<DeploymentInfo> =
            serde_json::from_slice(&output.stdout).map_err(|e| Error::ParseDeploymentList {
                project: project.to_string(),
                source: e,
            })?;

        log::debug!(
            "Found {} deployments in {project}: {:?}",
            deployments.len(),
            deployments.iter().map(|d| d.name.as_str()).collect::<Vec<_>>()
        );
        Ok(deployments)
    }

    /// Check whether a deployment exists in a project.
    pub fn deployment_exists(&self, name: &str, project: &str) -> Result<bool> {
        Ok(self
            .list_deployments(project)?
            .iter()
            .any(|d| d.name == name))
    }

    /// Decide whether an upsert of `name` would create or update.
    pub fn decide(&self, name: &str, project: &str) -> Result<UpsertDecision> {
        self.deployment_exists(name, project)
            .map(UpsertDecision::from_exists)
    }

    // =========================================================================
    // Upsert
    // =========================================================================

    /// Create the deployment if it does not exist, else update it.
    ///
    /// The manifest is written to a temporary file that is removed when this
    /// call returns, whatever the outcome.
    pub fn upsert(&self, name: &str, deployment: &Deployment, project: &str) -> Result<()> {
        let decision = self.decide(name, project)?;
        self.upsert_as(name, decision, deployment, project)
    }

    /// Apply a decision already obtained from [`Client::decide`].
    ///
    /// No existence check is made, so the command run is the one the caller
    /// showed or confirmed.
    pub fn upsert_as(
        &self,
        name: &str,
        decision: UpsertDecision,
        deployment: &Deployment,
        project: &str,
    ) -> Result<()> {
        let yaml = deployment.to_yaml()?;
        log::debug!("Deployment {name:?}:\n{yaml}");

        let mut tmp = tempfile::Builder::new()
            .prefix("deployment-")
            .suffix(".yaml")
            .tempfile()
            .map_err(Error::TempFile)?;
        tmp.write_all(yaml.as_bytes()).map_err(Error::TempFile)?;
        let path = tmp.into_temp_path();

        self.apply(name, decision, &path, project)
    }

    /// Create the deployment from a YAML file if it does not exist, else
    /// update it.
    pub fn upsert_from_file(&self, name: &str, file: &Path, project: &str) -> Result<()> {
        let decision = self.decide(name, project)?;
        self.apply(name, decision, file, project)
    }

    fn apply(
        &self,
        name: &str,
        decision: UpsertDecision,
        file: &Path,
        project: &str,
    ) -> Result<()> {
        let cmd = self
            .deployments_cmd()
            .args(decision.args(name))
            .args(["--project", project])
            .arg("--config")
            .arg(file.to_string_lossy());

        log::info!("Running: {cmd}");
        self.runner.run(&cmd).map_err(|e| Error::Apply {
            name: name.to_string(),
            project: project.to_string(),
            decision,
            source: e,
        })
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
