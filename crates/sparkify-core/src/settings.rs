//! Typed view of the `aws.ini` configuration file.
//!
//! The file is read once at process start and passed by reference into every
//! component that needs it; nothing here is global or mutable after load.
//!
//! ```ini
//! [AWS]
//! REGION = us-west-2
//! KEY    = ...
//! SECRET = ...
//!
//! [REDSHIFT]
//! ENDPOINT = example.abc123.us-west-2.redshift.amazonaws.com
//! PORT     = 5439
//! DATABASE = dev
//! USER     = awsuser
//! PASSWORD = ...
//!
//! [S3]
//! LOG_DATA  = s3://udacity-dend/log_data
//! SONG_DATA = s3://udacity-dend/song_data
//!
//! [IAM]
//! REDSHIFT_ROLE_ARN = arn:aws:iam::123456789012:role/dwhRole
//! ```

use std::{fmt, path::Path};

use serde::Deserialize;

use crate::Result;

// Section and option names are matched in either case: the INI source may or
// may not fold keys to lowercase before they reach serde.

/// All settings the ETL needs, one field per INI section.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(alias = "AWS")]
  pub aws:      AwsSettings,
  #[serde(alias = "REDSHIFT")]
  pub redshift: RedshiftSettings,
  #[serde(alias = "S3")]
  pub s3:       S3Settings,
  #[serde(alias = "IAM")]
  pub iam:      IamSettings,
}

/// `[AWS]` — credentials used by the object storage loader and the region
/// passed to bulk loads.
#[derive(Clone, Deserialize)]
pub struct AwsSettings {
  #[serde(alias = "REGION")]
  pub region: String,
  #[serde(alias = "KEY")]
  pub key:    String,
  #[serde(alias = "SECRET")]
  pub secret: String,
}

/// `[REDSHIFT]` — warehouse endpoint and login.
#[derive(Clone, Deserialize)]
pub struct RedshiftSettings {
  #[serde(alias = "ENDPOINT")]
  pub endpoint: String,
  #[serde(alias = "PORT")]
  pub port:     u16,
  #[serde(alias = "DATABASE")]
  pub database: String,
  #[serde(alias = "USER")]
  pub user:     String,
  #[serde(alias = "PASSWORD")]
  pub password: String,
}

/// `[S3]` — bulk-load sources for the two staging tables.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Settings {
  #[serde(alias = "LOG_DATA")]
  pub log_data:  String,
  #[serde(alias = "SONG_DATA")]
  pub song_data: String,
}

/// `[IAM]` — role the warehouse assumes to read from the bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct IamSettings {
  #[serde(alias = "REDSHIFT_ROLE_ARN")]
  pub redshift_role_arn: String,
}

impl Settings {
  /// Looked up relative to the working directory, like the original scripts.
  pub const DEFAULT_PATH: &'static str = "aws.ini";

  /// Read and validate the INI file at `path`.
  ///
  /// A missing file, section or option is an error; so is a `PORT` that does
  /// not fit in a `u16`. The file must be UTF-8.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let source = ::config::File::from(path.as_ref())
      .format(::config::FileFormat::Ini)
      .required(true);

    let settings = ::config::Config::builder()
      .add_source(source)
      .build()?
      .try_deserialize()?;

    Ok(settings)
  }
}

impl fmt::Debug for AwsSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AwsSettings")
      .field("region", &self.region)
      .field("key", &self.key)
      .field("secret", &"<redacted>")
      .finish()
  }
}

impl fmt::Debug for RedshiftSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RedshiftSettings")
      .field("endpoint", &self.endpoint)
      .field("port", &self.port)
      .field("database", &self.database)
      .field("user", &self.user)
      .field("password", &"<redacted>")
      .finish()
  }
}
