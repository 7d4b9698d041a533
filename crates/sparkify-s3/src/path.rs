//! `scheme://bucket/prefix` locators.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// A bucket name and an object key (or key prefix).
///
/// Parsing is positional: the string is split on `/` and segments 2 and 3
/// become the bucket and the key. Anything after segment 3 is ignored, so
/// `s3://bucket/song_data/A/B` addresses prefix `song_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPath {
  pub bucket: String,
  pub key:    String,
}

impl BucketPath {
  pub fn parse(path: &str) -> Result<Self> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 4 {
      return Err(Error::InvalidPath {
        path:   path.to_owned(),
        reason: "expected scheme://bucket/prefix",
      });
    }
    if segments[2].is_empty() {
      return Err(Error::InvalidPath { path: path.to_owned(), reason: "empty bucket name" });
    }

    Ok(Self { bucket: segments[2].to_owned(), key: segments[3].to_owned() })
  }
}

impl FromStr for BucketPath {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for BucketPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "s3://{}/{}", self.bucket, self.key)
  }
}
