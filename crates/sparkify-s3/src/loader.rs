//! [`S3Loader`] and the bucket connectors it reads through.

use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt as _;
use object_store::{ObjectStore, aws::AmazonS3Builder, path::Path};
use serde_json::Value;
use sparkify_core::settings::AwsSettings;
use tracing::{debug, info};

use crate::{BucketPath, Error, Frame, Result};

/// How many `.json` objects [`S3Loader::load_data`] reads when the caller
/// has no better number.
pub const DEFAULT_FILE_COUNT: usize = 1;

// ─── Connectors ──────────────────────────────────────────────────────────────

/// Resolves a bucket name to a store rooted at that bucket.
pub trait BucketConnector: Send + Sync {
  fn bucket(&self, name: &str) -> Result<Arc<dyn ObjectStore>>;
}

/// Opens S3 buckets with the `[AWS]` credentials.
#[derive(Clone)]
pub struct AwsBuckets {
  region: String,
  key:    String,
  secret: String,
}

impl AwsBuckets {
  pub fn new(settings: &AwsSettings) -> Self {
    Self {
      region: settings.region.clone(),
      key:    settings.key.clone(),
      secret: settings.secret.clone(),
    }
  }
}

impl BucketConnector for AwsBuckets {
  fn bucket(&self, name: &str) -> Result<Arc<dyn ObjectStore>> {
    let store = AmazonS3Builder::new()
      .with_region(&self.region)
      .with_access_key_id(&self.key)
      .with_secret_access_key(&self.secret)
      .with_bucket_name(name)
      .build()?;
    Ok(Arc::new(store))
  }
}

// ─── Loader ──────────────────────────────────────────────────────────────────

/// Reads JSON objects from `scheme://bucket/prefix` paths.
///
/// Every call lists or fetches synchronously from the caller's point of view
/// and reads whole object bodies into memory; there is no retry or
/// streaming.
pub struct S3Loader<C = AwsBuckets> {
  buckets: C,
}

impl S3Loader<AwsBuckets> {
  pub fn new(settings: &AwsSettings) -> Self {
    Self::with_connector(AwsBuckets::new(settings))
  }
}

impl<C: BucketConnector> S3Loader<C> {
  pub fn with_connector(buckets: C) -> Self { Self { buckets } }

  /// Load the first `file_count` `.json` objects whose key starts with the
  /// path's prefix, in listing order, as one frame.
  ///
  /// The prefix is a plain string match, as in S3 itself: `s3://b/song`
  /// covers `song_data/x.json`, and `s3://b/a.json` covers `a.json`. Objects
  /// whose key does not end in `.json` are skipped and do not count towards
  /// `file_count`. Each body is parsed as newline-delimited JSON.
  /// Returns [`Error::NoMatchingObjects`] when nothing was loaded, including
  /// when `file_count` is zero.
  pub async fn load_data(&self, bucket_path: &str, file_count: usize) -> Result<Frame> {
    let path = BucketPath::parse(bucket_path)?;
    let store = self.buckets.bucket(&path.bucket)?;
    // Positional parsing leaves the key a single segment, so every match
    // sits under the bucket root.
    let mut listing = store.list(None);
    let mut frames = Vec::new();

    while frames.len() < file_count {
      let Some(meta) = listing.next().await else { break };
      let location = meta?.location;

      if !location.as_ref().starts_with(path.key.as_str()) {
        continue;
      }
      if !location.as_ref().ends_with(".json") {
        debug!(key = %location, "skipping non-JSON object");
        continue;
      }

      let body = fetch(store.as_ref(), &path.bucket, &location).await?;
      let frame = Frame::from_ndjson(location.as_ref(), &body)?;
      debug!(key = %location, rows = frame.len(), "loaded object");
      frames.push(frame);
    }

    if frames.is_empty() {
      return Err(Error::NoMatchingObjects { bucket: path.bucket, prefix: path.key });
    }

    let objects = frames.len();
    let combined = Frame::concat(frames);
    info!(%path, objects, rows = combined.len(), "loaded JSON data");
    Ok(combined)
  }

  /// [`load_data`](Self::load_data) with [`DEFAULT_FILE_COUNT`].
  pub async fn load_data_default(&self, bucket_path: &str) -> Result<Frame> {
    self.load_data(bucket_path, DEFAULT_FILE_COUNT).await
  }

  /// Fetch the single object at the path and parse it as one JSON document.
  pub async fn load_path(&self, bucket_path: &str) -> Result<Value> {
    let path = BucketPath::parse(bucket_path)?;
    if path.key.is_empty() {
      return Err(Error::InvalidPath {
        path:   bucket_path.to_owned(),
        reason: "empty object key",
      });
    }

    let store = self.buckets.bucket(&path.bucket)?;
    let body = fetch(store.as_ref(), &path.bucket, &Path::from(path.key.as_str())).await?;
    let value = serde_json::from_slice(&body)?;
    debug!(%path, bytes = body.len(), "loaded JSON document");
    Ok(value)
  }
}

async fn fetch(store: &dyn ObjectStore, bucket: &str, location: &Path) -> Result<Bytes> {
  let object = store.get(location).await.map_err(|e| match e {
    object_store::Error::NotFound { .. } => Error::NotFound {
      bucket: bucket.to_owned(),
      key:    location.to_string(),
    },
    other => Error::ObjectStore(other),
  })?;
  Ok(object.bytes().await?)
}
