//! `deployctl rules` - generate Forseti scanner rules.

use anyhow::{Context, Result, bail};
use rulegen::{Destination, RuleWriter};

use crate::Context as AppContext;
use crate::cli::RulesArgs;
use crate::generators::{self, GENERATORS};
use crate::infra::InfraConfig;
use crate::ui;

pub fn run(ctx: &AppContext, args: RulesArgs) -> Result<()> {
    let conf = InfraConfig::load(&args.config)?;
    let destination = resolve_destination(&conf, args.output_path.as_deref())?;

    for unknown in conf.unknown_scanners(&generators::categories()) {
        log::warn!("Ignoring unknown scanner category {unknown:?} in config");
    }

    if !ctx.quiet {
        ui::info(&format!(
            "Generating rules for {} scanners into {destination}",
            GENERATORS.len()
        ));
    }

    let writer = RuleWriter::new().storage_cli(&ctx.settings.gsutil);
    let rules = rulegen::run(&conf, GENERATORS, &writer, &destination)?;

    if !ctx.quiet {
        for set in &rules {
            ui::rule_file(&set.file_name(), set.rules.len());
        }
        ui::success(&format!("Wrote {} rule files to {destination}", rules.len()));
    }
    Ok(())
}

/// Output path from the flag, else the Forseti server bucket.
fn resolve_destination(conf: &InfraConfig, output_path: Option<&str>) -> Result<Destination> {
    if conf.forseti.is_none() {
        bail!("forseti config must be set when using the rule generator");
    }

    let output = output_path
        .filter(|p| !p.is_empty())
        .or_else(|| conf.default_output_path())
        .context("No output path given and forseti.service_bucket is not set")?;

    Ok(Destination::parse(output)?)
}
