//! Fan-out over the generator registry.
//!
//! Every generator runs even after another one failed, so a single run
//! reports every misconfigured category at once. The result is still
//! all-or-nothing: any failure means no rules are returned.

use crate::error::{Error, Result};
use crate::types::{Generator, RuleMap, RuleSet};
use std::fmt;

/// A category whose generator failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// Category name
    pub category: String,
    /// Failure reason, including its cause chain
    pub reason: String,
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {:?}: {}", self.category, self.reason)
    }
}

/// Outcome of one aggregation run: every category, succeeded or not.
#[derive(Debug, Default)]
pub struct AggregationResult {
    entries: Vec<(String, Option<RuleSet>)>,
    failures: Vec<GenerationFailure>,
}

impl AggregationResult {
    fn record(&mut self, category: &str, outcome: std::result::Result<RuleSet, String>) {
        match outcome {
            Ok(set) => self.entries.push((category.to_string(), Some(set))),
            Err(reason) => {
                self.entries.push((category.to_string(), None));
                self.failures.push(GenerationFailure {
                    category: category.to_string(),
                    reason,
                });
            }
        }
    }

    /// Every category seen, in registry order, including failed ones.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Failures, in registry order.
    pub fn failures(&self) -> &[GenerationFailure] {
        &self.failures
    }

    /// Whether every generator succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Convert into rules, or the aggregate error if anything failed.
    pub fn into_rules(self) -> Result<RuleMap> {
        if !self.failures.is_empty() {
            return Err(Error::Generation {
                failures: self.failures,
            });
        }
        Ok(self.entries.into_iter().filter_map(|(_, set)| set).collect())
    }
}

/// Run every generator against `conf` and collect the outcomes.
pub fn aggregate<C>(conf: &C, generators: &[Generator<C>]) -> AggregationResult {
    let mut result = AggregationResult::default();

    for generator in generators {
        let category = generator.category;
        if result.categories().any(|c| c == category) {
            result.record(category, Err("category registered more than once".to_string()));
            continue;
        }

        let outcome = (generator.generate)(conf)
            .map(|rules| {
                log::debug!("Generated {} {category} rules", rules.len());
                RuleSet::new(category, rules)
            })
            .map_err(|e| format!("{e:#}"));
        result.record(category, outcome);
    }

    result
}

/// Generate rules for every category, failing if any generator failed.
///
/// The error lists every failed category with its reason.
pub fn generate<C>(conf: &C, generators: &[Generator<C>]) -> Result<RuleMap> {
    aggregate(conf, generators).into_rules()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rule;
    use anyhow::{Context, bail};
    use serde_yaml_ng::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Conf {
        calls: AtomicUsize,
    }

    impl Conf {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    fn rule(name: &str) -> Rule {
        let mut m = serde_yaml_ng::Mapping::new();
        m.insert(Value::from("name"), Value::from(name));
        Value::Mapping(m)
    }

    fn bucket(conf: &Conf) -> anyhow::Result<Vec<Rule>> {
        conf.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![rule("Disallow all acl rules, only allow IAM.")])
    }

    fn iam(conf: &Conf) -> anyhow::Result<Vec<Rule>> {
        conf.calls.fetch_add(1, Ordering::SeqCst);
        bail!("owners group not set")
    }

    fn lien(conf: &Conf) -> anyhow::Result<Vec<Rule>> {
        conf.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![rule("Require project deletion liens for all projects.")])
    }

    fn location(conf: &Conf) -> anyhow::Result<Vec<Rule>> {
        conf.calls.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("unknown location \"MARS\""))
            .context("failed to resolve dataset locations")
    }

    static ALL_OK: &[Generator<Conf>] = &[
        Generator::new("bucket", bucket),
        Generator::new("lien", lien),
    ];

    static TWO_FAIL: &[Generator<Conf>] = &[
        Generator::new("bucket", bucket),
        Generator::new("iam", iam),
        Generator::new("lien", lien),
        Generator::new("location", location),
    ];

    #[test]
    fn test_all_succeed() {
        let conf = Conf::new();
        let rules = generate(&conf, ALL_OK).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.categories().collect::<Vec<_>>(), ["bucket", "lien"]);
        assert_eq!(rules.get("bucket").unwrap().rules.len(), 1);
    }

    #[test]
    fn test_failures_do_not_short_circuit() {
        let conf = Conf::new();
        let result = aggregate(&conf, TWO_FAIL);

        assert_eq!(conf.calls.load(Ordering::SeqCst), 4);
        assert_eq!(
            result.categories().collect::<Vec<_>>(),
            ["bucket", "iam", "lien", "location"]
        );
        assert_eq!(result.failures().len(), 2);
        assert!(!result.is_success());
    }

    #[test]
    fn test_error_lists_every_failed_category() {
        let conf = Conf::new();
        let err = generate(&conf, TWO_FAIL).unwrap_err();
        let msg = err.to_string();

        assert!(msg.starts_with("failed to generate rules for 2 scanners:"));
        assert!(msg.contains("- \"iam\": owners group not set"));
        assert!(msg.contains(
            "- \"location\": failed to resolve dataset locations: unknown location \"MARS\""
        ));
        assert!(!msg.contains("\"bucket\""));
        assert!(!msg.contains("\"lien\""));
    }

    #[test]
    fn test_single_failure_exposes_no_rules() {
        static GENERATORS: &[Generator<Conf>] =
            &[Generator::new("bucket", bucket), Generator::new("iam", iam)];

        let conf = Conf::new();
        match generate(&conf, GENERATORS) {
            Err(Error::Generation { failures }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].category, "iam");
            }
            other => panic!("expected generation error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_category_is_a_failure() {
        static GENERATORS: &[Generator<Conf>] = &[
            Generator::new("bucket", bucket),
            Generator::new("bucket", bucket),
        ];

        let conf = Conf::new();
        let result = aggregate(&conf, GENERATORS);
        assert_eq!(conf.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.failures().len(), 1);
        assert!(result.failures()[0].reason.contains("more than once"));
    }

    #[test]
    fn test_empty_registry() {
        let conf = Conf::new();
        let rules = generate(&conf, &[]).unwrap();
        assert!(rules.is_empty());
    }
}
