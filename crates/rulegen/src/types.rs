//! Rule and generator types.

use serde_yaml_ng::Value;

/// An opaque scanner rule record. Mapping key order is preserved on output.
pub type Rule = Value;

/// Signature of a rule generator: derive one category's rules from a config.
pub type GenerateFn<C> = fn(&C) -> anyhow::Result<Vec<Rule>>;

/// A named rule generator.
///
/// Registries are plain static slices:
///
/// ```
/// use rulegen::{Generator, Rule};
///
/// struct Config;
///
/// fn lien_rules(_: &Config) -> anyhow::Result<Vec<Rule>> {
///     Ok(vec![])
/// }
///
/// static GENERATORS: &[Generator<Config>] = &[Generator::new("lien", lien_rules)];
/// assert_eq!(GENERATORS[0].category, "lien");
/// ```
pub struct Generator<C> {
    /// Category name; also the rule file stem (`<category>_rules.yaml`)
    pub category: &'static str,
    /// Generator function
    pub generate: GenerateFn<C>,
}

impl<C> Generator<C> {
    /// Create a generator.
    pub const fn new(category: &'static str, generate: GenerateFn<C>) -> Self {
        Self { category, generate }
    }
}

/// Rules produced for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Category name
    pub category: String,
    /// Rules in generator order
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set.
    pub fn new(category: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            category: category.into(),
            rules,
        }
    }

    /// File name the rule set is written to.
    pub fn file_name(&self) -> String {
        format!("{}_rules.yaml", self.category)
    }
}

/// Rule sets for every registered category, in registry order.
///
/// Only produced when every generator succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleMap {
    sets: Vec<RuleSet>,
}

impl RuleMap {
    pub(crate) fn from_sets(sets: Vec<RuleSet>) -> Self {
        Self { sets }
    }

    /// Rule set for a category.
    pub fn get(&self, category: &str) -> Option<&RuleSet> {
        self.sets.iter().find(|s| s.category == category)
    }

    /// Category names, in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.category.as_str())
    }

    /// Iterate over rule sets.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleSet> {
        self.sets.iter()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleMap {
    type Item = &'a RuleSet;
    type IntoIter = std::slice::Iter<'a, RuleSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<RuleSet> for RuleMap {
    fn from_iter<I: IntoIterator<Item = RuleSet>>(iter: I) -> Self {
        Self::from_sets(iter.into_iter().collect())
    }
}
