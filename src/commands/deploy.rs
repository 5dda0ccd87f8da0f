//! `deployctl deploy` - create or update a deployment from a manifest file.

use anyhow::{Context, Result};
use colored::Colorize;
use deploymentmanager::{Client, Deployment, UpsertDecision};

use crate::Context as AppContext;
use crate::cli::DeployArgs;
use crate::ui;

pub fn run(ctx: &AppContext, args: DeployArgs) -> Result<()> {
    let project = ctx.settings.project(args.project)?;
    let deployment = Deployment::from_file(&args.manifest)?;
    let client = Client::new().cli(&ctx.settings.gcloud);

    let decision = client
        .decide(&args.name, &project)
        .context("Failed to check if deployment exists")?;

    if !ctx.quiet {
        print_plan(&args.name, &project, &deployment, decision);
    }

    if args.dry_run || ctx.verbose > 0 {
        ui::header("Manifest");
        print!("{}", deployment.to_yaml()?);
    }

    if args.dry_run {
        ui::info("Dry run - nothing applied");
        return Ok(());
    }

    if !args.yes && !confirm(&args.name, decision)? {
        ui::warn("Aborted");
        return Ok(());
    }

    // Apply exactly what was shown and confirmed.
    client.upsert_as(&args.name, decision, &deployment, &project)?;
    if !ctx.quiet {
        ui::success(&format!("Deployment {} applied to {project}", args.name.bold()));
    }
    Ok(())
}

fn print_plan(name: &str, project: &str, deployment: &Deployment, decision: UpsertDecision) {
    ui::header(&format!("Deployment {name}"));
    ui::kv("project", project);
    ui::kv("resources", &deployment.resources.len().to_string());
    ui::kv("action", &ui::decision(decision).to_string());
    if decision == UpsertDecision::UpdateAbandon {
        ui::dim("Resources removed from the manifest will be abandoned, not deleted.");
    }
}

fn confirm(name: &str, decision: UpsertDecision) -> Result<bool> {
    let verb = match decision {
        UpsertDecision::Create => "Create",
        UpsertDecision::UpdateAbandon => "Update",
    };
    dialoguer::Confirm::new()
        .with_prompt(format!("{verb} deployment {name}?"))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}
