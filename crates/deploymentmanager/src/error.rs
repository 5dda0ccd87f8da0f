//! Error types for deployment manager operations.

use crate::types::UpsertDecision;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating or updating a deployment.
///
/// None of these are retried: a create or update that failed part way is
/// not guaranteed to be safe to repeat.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest could not be serialized
    #[error("failed to marshal deployment")]
    Marshal(#[source] serde_yaml_ng::Error),

    /// A manifest file could not be parsed
    #[error("failed to parse deployment manifest")]
    ParseManifest(#[source] serde_yaml_ng::Error),

    /// A manifest file could not be read
    #[error("failed to read deployment manifest {}", .path.display())]
    ReadManifest {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The temporary manifest file could not be created or written
    #[error("failed to write deployment to temp file")]
    TempFile(#[source] std::io::Error),

    /// Listing existing deployments failed
    #[error("failed to list deployments in project {project}")]
    ListDeployments {
        /// Project that was queried
        project: String,
        /// Executor error
        #[source]
        source: cmdexec::Error,
    },

    /// The deployment list output was not the expected JSON
    #[error("failed to parse deployment list for project {project}")]
    ParseDeploymentList {
        /// Project that was queried
        project: String,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The create or update command failed
    #[error("failed to {decision} deployment {name:?} in project {project}")]
    Apply {
        /// Deployment name
        name: String,
        /// Project the deployment belongs to
        project: String,
        /// Whether this was a create or an update
        decision: UpsertDecision,
        /// Executor error
        #[source]
        source: cmdexec::Error,
    },
}

/// Result type for deployment manager operations.
pub type Result<T> = std::result::Result<T, Error>;
