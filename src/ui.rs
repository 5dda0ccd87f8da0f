//! Terminal output for deployctl commands.
//!
//! Status lines go to stdout, errors to stderr. Diagnostics belong in `log`.

use colored::{ColoredString, Colorize};
use deploymentmanager::UpsertDecision;

pub fn info(msg: &str) {
    println!("{} {msg}", "::".blue().bold());
}

pub fn success(msg: &str) {
    println!("{} {msg}", "ok".green().bold());
}

pub fn warn(msg: &str) {
    println!("{} {msg}", "warning:".yellow().bold());
}

pub fn error(msg: &str) {
    eprintln!("{} {msg}", "error:".red().bold());
}

pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Section title, underlined to its display width.
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

pub fn kv(key: &str, value: &str) {
    println!("  {:<10} {value}", format!("{key}:").dimmed());
}

/// Decision label: green for a new deployment, yellow for an update.
pub fn decision(decision: UpsertDecision) -> ColoredString {
    let label = decision.to_string();
    match decision {
        UpsertDecision::Create => label.green(),
        UpsertDecision::UpdateAbandon => label.yellow(),
    }
}

/// One written rule file and how many rules it holds.
pub fn rule_file(file: &str, count: usize) {
    let rules = if count == 1 { "rule" } else { "rules" };
    println!("  {} {file} {}", "+".green(), format!("({count} {rules})").dimmed());
}
