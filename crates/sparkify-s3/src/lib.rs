//! Object storage loader for the Sparkify ETL.
//!
//! Reads JSON objects out of S3 for exploration and spot checks: either the
//! first few newline-delimited JSON files under a prefix, combined into one
//! [`Frame`], or a single JSON document.
//!
//! # Quick start
//!
//! ```no_run
//! # async fn demo(settings: sparkify_core::Settings) -> sparkify_s3::Result<()> {
//! use sparkify_s3::S3Loader;
//!
//! let loader = S3Loader::new(&settings.aws);
//! let songs = loader.load_data("s3://udacity-dend/song_data", 5).await?;
//! println!("{} rows, columns {:?}", songs.len(), songs.columns());
//! # Ok(())
//! # }
//! ```

mod frame;
mod loader;
mod path;

pub mod error;

pub use error::{Error, Result};
pub use frame::Frame;
pub use loader::{AwsBuckets, BucketConnector, DEFAULT_FILE_COUNT, S3Loader};
pub use path::BucketPath;
