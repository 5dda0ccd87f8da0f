use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deployctl")]
#[command(version)]
#[command(
    about = "Apply Deployment Manager manifests and generate Forseti scanner rules",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a deployment, or update it if it already exists
    ///
    /// Updates use the ABANDON delete policy: resources dropped from the
    /// manifest are detached from the deployment, never deleted.
    Deploy(DeployArgs),

    /// List deployments in a project
    Deployments(DeploymentsArgs),

    /// Generate Forseti scanner rules and write them locally or to GCS
    Rules(RulesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Deployment name
    pub name: String,

    /// Deployment manifest (YAML with `imports` and `resources`)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// GCP project (defaults to `default_project` from config.toml)
    #[arg(short, long, env = "DEPLOYCTL_PROJECT")]
    pub project: Option<String>,

    /// Show what would be applied without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct DeploymentsArgs {
    /// GCP project (defaults to `default_project` from config.toml)
    #[arg(short, long, env = "DEPLOYCTL_PROJECT")]
    pub project: Option<String>,
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Infrastructure config with `forseti` and `scanners` sections
    #[arg(short, long)]
    pub config: PathBuf,

    /// Local directory or gs:// path (defaults to the Forseti server bucket)
    #[arg(short, long)]
    pub output_path: Option<String>,
}
