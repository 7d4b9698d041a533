//! [`RedshiftWarehouse`] — the `sqlx` backed connection selected with
//! `--redshift`.

use sparkify_core::{Warehouse, settings::RedshiftSettings};
use sqlx::{Connection as _, PgConnection, postgres::PgConnectOptions};
use tracing::debug;

use crate::{
  Error, Result,
  session::{Session, SimpleQuery},
};

/// A warehouse session over a single `sqlx` Postgres connection.
///
/// Statements go through [`sqlx::raw_sql`], so nothing is prepared and COPY
/// or multi-statement text is sent exactly as written.
pub struct RedshiftWarehouse {
  session: Session<PgConnection>,
}

impl RedshiftWarehouse {
  pub async fn connect(settings: &RedshiftSettings) -> Result<Self> {
    let options = PgConnectOptions::new()
      .host(&settings.endpoint)
      .port(settings.port)
      .database(&settings.database)
      .username(&settings.user)
      .password(&settings.password)
      .application_name(env!("CARGO_PKG_NAME"));

    let conn = PgConnection::connect_with(&options)
      .await
      .map_err(|e| Error::Connect {
        host:   settings.endpoint.clone(),
        port:   settings.port,
        source: Box::new(e),
      })?;

    debug!(host = %settings.endpoint, port = settings.port, "sqlx session opened");
    Ok(Self { session: Session::new(conn) })
  }
}

impl SimpleQuery for PgConnection {
  async fn run(&mut self, sql: &str) -> Result<()> {
    sqlx::Executor::execute(&mut *self, sqlx::raw_sql(sql)).await?;
    Ok(())
  }
}

impl Warehouse for RedshiftWarehouse {
  type Error = Error;

  async fn execute(&mut self, query: &str, commit: bool) -> Result<()> {
    self.session.execute(query, commit).await
  }

  async fn commit(&mut self) -> Result<()> { self.session.commit().await }

  async fn close(self) -> Result<()> {
    self.session.into_client().close().await?;
    debug!("sqlx session closed");
    Ok(())
  }
}
