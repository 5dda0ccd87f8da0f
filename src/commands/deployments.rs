//! `deployctl deployments` - list deployments in a project.

use anyhow::Result;

use crate::Context as AppContext;
use crate::cli::DeploymentsArgs;
use crate::ui;

pub fn run(ctx: &AppContext, args: DeploymentsArgs) -> Result<()> {
    let project = ctx.settings.project(args.project)?;
    let client = deploymentmanager::Client::new().cli(&ctx.settings.gcloud);
    let deployments = client.list_deployments(&project)?;

    if !ctx.quiet {
        ui::header(&format!("Deployments in {project}"));
    }
    if deployments.is_empty() {
        ui::dim("(none)");
    }
    for d in &deployments {
        println!("  {}", d.name);
    }
    Ok(())
}
