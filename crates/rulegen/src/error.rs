//! Error types for rule generation and writing.

use crate::aggregate::GenerationFailure;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating or writing rules.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more generators failed; no rules were written
    #[error("failed to generate rules for {} scanners:\n{}", .failures.len(), failure_lines(.failures))]
    Generation {
        /// Every failed category, in registry order
        failures: Vec<GenerationFailure>,
    },

    /// The output path is not a usable destination
    #[error("invalid rules destination {0:?}")]
    InvalidDestination(String),

    /// The local staging directory could not be created
    #[error("failed to create temp dir")]
    StagingDir(#[source] std::io::Error),

    /// The local output directory could not be created
    #[error("failed to create output directory {}", .path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A rule set could not be serialized
    #[error("failed to marshal rules for {category:?}")]
    Serialize {
        /// Category being serialized
        category: String,
        /// YAML error
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A rule file could not be written
    #[error("failed to write rules to {}", .path.display())]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Copying staged rules to the bucket failed
    #[error("failed to copy rule files to {remote}")]
    Copy {
        /// Remote target URI
        remote: String,
        /// Executor error, including captured output
        #[source]
        source: cmdexec::Error,
    },
}

fn failure_lines(failures: &[GenerationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type for rule operations.
pub type Result<T> = std::result::Result<T, Error>;
