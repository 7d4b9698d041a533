//! Error types for `sparkify-s3`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid bucket path {path:?}: {reason}")]
  InvalidPath { path: String, reason: &'static str },

  #[error("object not found: s3://{bucket}/{key}")]
  NotFound { bucket: String, key: String },

  #[error("no .json objects loaded from s3://{bucket}/{prefix}")]
  NoMatchingObjects { bucket: String, prefix: String },

  #[error("{key} line {line}: expected a JSON object: {source}")]
  MalformedLine {
    key:    String,
    line:   usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("object store error: {0}")]
  ObjectStore(#[from] object_store::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
