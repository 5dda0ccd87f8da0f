//! Where rule files go: a local directory or a GCS bucket path.

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

/// URI scheme prefix recognized as a remote bucket.
pub const BUCKET_SCHEME: &str = "gs://";

/// Path segment rule files are copied under in a bucket.
const RULES_SEGMENT: &str = "rules";

/// A GCS location, split into bucket and object path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPath {
    /// Bucket name
    pub bucket: String,
    /// Object path within the bucket, without leading or trailing slashes
    pub path: String,
}

impl BucketPath {
    /// The `rules` folder under this location, e.g. `gs://b/p/rules`.
    pub fn rules_uri(&self) -> String {
        let path = clean_join(&self.path, RULES_SEGMENT);
        format!("{BUCKET_SCHEME}{}/{path}", self.bucket)
    }
}

impl fmt::Display for BucketPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{BUCKET_SCHEME}{}", self.bucket)
        } else {
            write!(f, "{BUCKET_SCHEME}{}/{}", self.bucket, self.path)
        }
    }
}

/// Rule output destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A directory on the local filesystem
    Local(PathBuf),
    /// A GCS bucket location; rules are staged locally and then copied
    Bucket(BucketPath),
}

impl Destination {
    /// Parse an output path. `gs://` URIs are buckets, anything else is local.
    pub fn parse(output: &str) -> Result<Self> {
        if output.trim().is_empty() {
            return Err(Error::InvalidDestination(output.to_string()));
        }

        let Some(rest) = output.strip_prefix(BUCKET_SCHEME) else {
            return Ok(Self::Local(PathBuf::from(output)));
        };

        let (bucket, path) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() {
            return Err(Error::InvalidDestination(output.to_string()));
        }

        Ok(Self::Bucket(BucketPath {
            bucket: bucket.to_string(),
            path: clean_join(path, ""),
        }))
    }

    /// Whether the destination needs a remote copy stage.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Bucket(_))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Bucket(bucket) => write!(f, "{bucket}"),
        }
    }
}

/// Join two slash-separated paths, dropping empty and `.` segments and
/// resolving `..`.
fn clean_join(base: &str, segment: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in base.split('/').chain(segment.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            p => parts.push(p),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(s: &str) -> BucketPath {
        match Destination::parse(s).unwrap() {
            Destination::Bucket(b) => b,
            other => panic!("expected bucket, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_local() {
        assert_eq!(
            Destination::parse("/tmp/rules").unwrap(),
            Destination::Local(PathBuf::from("/tmp/rules"))
        );
        assert_eq!(
            Destination::parse("out").unwrap(),
            Destination::Local(PathBuf::from("out"))
        );
        // Only gs:// is remote
        assert!(!Destination::parse("s3://bucket/path").unwrap().is_remote());
    }

    #[test]
    fn test_parse_bucket() {
        let b = bucket("gs://my-bucket/path/to");
        assert_eq!(b.bucket, "my-bucket");
        assert_eq!(b.path, "path/to");
        assert_eq!(b.to_string(), "gs://my-bucket/path/to");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Destination::parse(""),
            Err(Error::InvalidDestination(_))
        ));
        assert!(matches!(
            Destination::parse("gs://"),
            Err(Error::InvalidDestination(_))
        ));
        assert!(matches!(
            Destination::parse("gs:///path"),
            Err(Error::InvalidDestination(_))
        ));
    }

    #[test]
    fn test_rules_uri() {
        assert_eq!(bucket("gs://bucket/path").rules_uri(), "gs://bucket/path/rules");
        assert_eq!(bucket("gs://bucket/path/").rules_uri(), "gs://bucket/path/rules");
        assert_eq!(bucket("gs://bucket").rules_uri(), "gs://bucket/rules");
        assert_eq!(bucket("gs://bucket/").rules_uri(), "gs://bucket/rules");
        assert_eq!(bucket("gs://bucket/a/./b/../c").rules_uri(), "gs://bucket/a/c/rules");
    }
}
