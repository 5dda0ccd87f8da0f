//! Writing rule files, with an optional copy to a bucket.
//!
//! For a bucket destination the files are first written to a local staging
//! directory. The copy runs only after every file was written, so the bucket
//! never receives a partial rule set. The staging directory is removed
//! afterwards on every path; a failure to remove it is logged, not returned.

use crate::destination::{BucketPath, Destination};
use crate::error::{Error, Result};
use crate::types::{Rule, RuleMap, RuleSet};
use cmdexec::{CommandLine, Runner, SystemRunner};
use serde::Serialize;
use std::path::Path;

/// Default storage CLI.
pub const DEFAULT_STORAGE_CLI: &str = "gsutil";

#[derive(Serialize)]
struct RulesFile<'a> {
    rules: &'a [Rule],
}

/// Writes rule sets to a [`Destination`].
pub struct RuleWriter {
    runner: Box<dyn Runner>,
    storage_cli: String,
}

impl RuleWriter {
    /// Create a writer that copies with the real `gsutil` CLI.
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemRunner::new()))
    }

    /// Create a writer with a custom runner (useful for testing).
    pub fn with_runner(runner: Box<dyn Runner>) -> Self {
        Self {
            runner,
            storage_cli: DEFAULT_STORAGE_CLI.to_string(),
        }
    }

    /// Use a different `gsutil` executable.
    pub fn storage_cli(mut self, cli: impl Into<String>) -> Self {
        self.storage_cli = cli.into();
        self
    }

    /// Write every rule set to the destination.
    pub fn write(&self, rules: &RuleMap, destination: &Destination) -> Result<()> {
        match destination {
            Destination::Local(dir) => {
                std::fs::create_dir_all(dir).map_err(|e| Error::CreateDir {
                    path: dir.clone(),
                    source: e,
                })?;
                write_local(rules, dir)
            }
            Destination::Bucket(bucket) => self.write_staged(rules, bucket),
        }
    }

    fn write_staged(&self, rules: &RuleMap, bucket: &BucketPath) -> Result<()> {
        if rules.is_empty() {
            log::info!("No rule sets to upload to {bucket}");
            return Ok(());
        }

        let staging = tempfile::Builder::new()
            .prefix("rules-")
            .tempdir()
            .map_err(Error::StagingDir)?;
        let staging_path = staging.path().to_path_buf();

        let result = write_local(rules, &staging_path)
            .and_then(|()| self.copy_to_bucket(&staging_path, bucket));

        if let Err(e) = staging.close() {
            log::warn!("Failed to delete temp dir {}: {e}", staging_path.display());
        }
        result
    }

    /// Copy staged `*.yaml` files to `<bucket path>/rules`.
    fn copy_to_bucket(&self, local: &Path, bucket: &BucketPath) -> Result<()> {
        let remote = bucket.rules_uri();
        log::info!("Uploading rules to {remote}");

        let cmd = CommandLine::new(&self.storage_cli)
            .arg("cp")
            .arg(local.join("*.yaml").to_string_lossy())
            .arg(&remote);

        self.runner
            .combined_output(&cmd)
            .map(|_| ())
            .map_err(|e| Error::Copy { remote, source: e })
    }
}

impl Default for RuleWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write each rule set to `<dir>/<category>_rules.yaml`, stopping at the
/// first failure.
fn write_local(rules: &RuleMap, dir: &Path) -> Result<()> {
    for set in rules {
        let content = serialize(set)?;
        let path = dir.join(set.file_name());
        log::info!("Writing {}", path.display());
        std::fs::write(&path, content).map_err(|e| Error::Write { path, source: e })?;
    }
    Ok(())
}

fn serialize(set: &RuleSet) -> Result<String> {
    serde_yaml_ng::to_string(&RulesFile { rules: &set.rules }).map_err(|e| Error::Serialize {
        category: set.category.clone(),
        source: e,
    })
}
