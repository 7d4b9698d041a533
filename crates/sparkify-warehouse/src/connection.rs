//! [`Connection`] — backend selection behind one [`Warehouse`] value.

use sparkify_core::{Settings, Warehouse};
use strum::Display;
use tracing::info;

use crate::{Error, PostgresWarehouse, RedshiftWarehouse, Result};

/// Which client library talks to the warehouse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
  /// `tokio-postgres`.
  #[default]
  Postgres,
  /// `sqlx`.
  Redshift,
}

impl Backend {
  /// Map the `--redshift` command-line flag to a backend.
  pub fn from_flag(redshift: bool) -> Self {
    if redshift { Self::Redshift } else { Self::Postgres }
  }
}

/// An open warehouse session on either backend.
///
/// Both variants behave identically from a pipeline's point of view; the
/// choice is made once, at [`connect`](Self::connect).
pub enum Connection {
  Postgres(PostgresWarehouse),
  Redshift(RedshiftWarehouse),
}

impl Connection {
  /// Open a session using the `[REDSHIFT]` settings.
  pub async fn connect(settings: &Settings, backend: Backend) -> Result<Self> {
    let redshift = &settings.redshift;
    info!(
      %backend,
      host = %redshift.endpoint,
      port = redshift.port,
      database = %redshift.database,
      region = %settings.aws.region,
      "connecting to the warehouse"
    );

    Ok(match backend {
      Backend::Postgres => Self::Postgres(PostgresWarehouse::connect(redshift).await?),
      Backend::Redshift => Self::Redshift(RedshiftWarehouse::connect(redshift).await?),
    })
  }

  pub fn backend(&self) -> Backend {
    match self {
      Self::Postgres(_) => Backend::Postgres,
      Self::Redshift(_) => Backend::Redshift,
    }
  }
}

impl Warehouse for Connection {
  type Error = Error;

  async fn execute(&mut self, query: &str, commit: bool) -> Result<()> {
    match self {
      Self::Postgres(conn) => conn.execute(query, commit).await,
      Self::Redshift(conn) => conn.execute(query, commit).await,
    }
  }

  async fn commit(&mut self) -> Result<()> {
    match self {
      Self::Postgres(conn) => conn.commit().await,
      Self::Redshift(conn) => conn.commit().await,
    }
  }

  async fn close(self) -> Result<()> {
    match self {
      Self::Postgres(conn) => conn.close().await,
      Self::Redshift(conn) => conn.close().await,
    }
  }
}
