//! # rulegen
//!
//! Generates policy scanner rule files from an infrastructure config.
//!
//! A caller declares a static registry of [`Generator`]s, one per rule
//! category. [`generate`] runs all of them and either returns every
//! category's rules or an error listing every category that failed.
//! [`RuleWriter`] then writes one `<category>_rules.yaml` per category to a
//! local directory, or stages them locally and copies them to
//! `gs://<bucket>/<path>/rules`.
//!
//! Nothing is written unless every generator succeeded.
//!
//! ## Example
//!
//! ```no_run
//! use rulegen::{Destination, Generator, Rule, RuleWriter};
//!
//! struct Config;
//!
//! fn bucket_rules(_: &Config) -> anyhow::Result<Vec<Rule>> {
//!     Ok(vec![serde_yaml_ng::from_str("name: Disallow all acl rules, only allow IAM.")?])
//! }
//!
//! static GENERATORS: &[Generator<Config>] = &[Generator::new("bucket", bucket_rules)];
//!
//! let destination = Destination::parse("gs://my-forseti-bucket").unwrap();
//! rulegen::run(&Config, GENERATORS, &RuleWriter::new(), &destination).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod destination;
pub mod error;
pub mod types;
pub mod writer;

pub use aggregate::{AggregationResult, GenerationFailure, aggregate, generate};
pub use destination::{BucketPath, Destination};
pub use error::{Error, Result};
pub use types::{GenerateFn, Generator, Rule, RuleMap, RuleSet};
pub use writer::RuleWriter;

/// Generate rules for every registered category and write them.
///
/// The writer is not invoked when any generator fails.
pub fn run<C>(
    conf: &C,
    generators: &[Generator<C>],
    writer: &RuleWriter,
    destination: &Destination,
) -> Result<RuleMap> {
    let rules = generate(conf, generators)?;
    writer.write(&rules, destination)?;
    Ok(rules)
}
