//! Forseti scanner rule generators
//!
//! Each scanner category takes the rule records declared under
//! `scanners.<category>` in the infrastructure config. A category that is
//! not declared produces an empty rule file.

use anyhow::{Context, Result, bail};
use rulegen::{Generator, Rule};
use serde_yaml_ng::Value;

use crate::infra::InfraConfig;

/// Every scanner category, in the order rule files are written.
pub static GENERATORS: &[Generator<InfraConfig>] = &[
    Generator::new("audit_logging", |c: &InfraConfig| declared_rules(c, "audit_logging")),
    Generator::new("bigquery", |c: &InfraConfig| declared_rules(c, "bigquery")),
    Generator::new("bucket", |c: &InfraConfig| declared_rules(c, "bucket")),
    Generator::new("cloudsql", |c: &InfraConfig| declared_rules(c, "cloudsql")),
    Generator::new("enabled_apis", |c: &InfraConfig| declared_rules(c, "enabled_apis")),
    Generator::new("iam", |c: &InfraConfig| declared_rules(c, "iam")),
    Generator::new("lien", |c: &InfraConfig| declared_rules(c, "lien")),
    Generator::new("location", |c: &InfraConfig| declared_rules(c, "location")),
    Generator::new("log_sink", |c: &InfraConfig| declared_rules(c, "log_sink")),
    Generator::new("resource", |c: &InfraConfig| declared_rules(c, "resource")),
];

/// Category names of [`GENERATORS`].
pub fn categories() -> Vec<&'static str> {
    GENERATORS.iter().map(|g| g.category).collect()
}

fn declared_rules(conf: &InfraConfig, category: &str) -> Result<Vec<Rule>> {
    let Some(value) = conf.scanner(category) else {
        return Ok(Vec::new());
    };

    let rules = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(rules) => rules,
        _ => bail!("scanners.{category} must be a list of rules"),
    };

    for (i, rule) in rules.iter().enumerate() {
        check_rule(rule).with_context(|| format!("invalid rule #{}", i + 1))?;
    }
    Ok(rules.clone())
}

fn check_rule(rule: &Value) -> Result<()> {
    let Some(mapping) = rule.as_mapping() else {
        bail!("rule must be a mapping");
    };
    match mapping.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => bail!("rule must have a non-empty string `name`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conf(yaml: &str) -> InfraConfig {
        InfraConfig::parse(yaml).unwrap()
    }

    #[test]
    fn test_registry_categories_unique() {
        let mut names = categories();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, 10);
    }

    #[test]
    fn test_undeclared_category_is_empty() {
        let rules = rulegen::generate(&conf("{}"), GENERATORS).unwrap();
        assert_eq!(rules.len(), GENERATORS.len());
        assert!(rules.iter().all(|s| s.rules.is_empty()));
    }

    #[test]
    fn test_declared_rules_pass_through_in_order() {
        let conf = conf(
            "
scanners:
  lien:
    - name: Require project deletion liens for all projects.
      mode: required
      restrictions: [resourcemanager.projects.delete]
    - name: Second
",
        );
        let rules = rulegen::generate(&conf, GENERATORS).unwrap();
        let lien = rules.get("lien").unwrap();
        assert_eq!(lien.rules.len(), 2);
        assert_eq!(lien.rules[1]["name"], Value::from("Second"));
    }

    #[test]
    fn test_every_invalid_category_reported() {
        let conf = conf(
            "
scanners:
  bucket: not-a-list
  iam:
    - mode: whitelist
  lien:
    - name: fine
",
        );
        let err = rulegen::generate(&conf, GENERATORS).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2 scanners"));
        assert!(msg.contains("\"bucket\": scanners.bucket must be a list of rules"));
        assert!(msg.contains("\"iam\": invalid rule #1: rule must have a non-empty string `name`"));
        assert!(!msg.contains("\"lien\""));
    }
}
