//! [`PostgresWarehouse`] — the default, `tokio-postgres` backed connection.

use sparkify_core::{Warehouse, settings::RedshiftSettings};
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

use crate::{
  Error, Result,
  session::{Session, SimpleQuery},
};

/// A warehouse session over a single `tokio-postgres` client.
///
/// The socket is driven by a background task spawned at connect time; it
/// finishes once the client is dropped in [`close`](Warehouse::close).
pub struct PostgresWarehouse {
  session: Session<Client>,
  driver:  JoinHandle<()>,
}

impl PostgresWarehouse {
  pub async fn connect(settings: &RedshiftSettings) -> Result<Self> {
    let mut config = tokio_postgres::Config::new();
    config
      .host(&settings.endpoint)
      .port(settings.port)
      .dbname(&settings.database)
      .user(&settings.user)
      .password(&settings.password);

    let (client, connection) =
      config.connect(NoTls).await.map_err(|e| Error::Connect {
        host:   settings.endpoint.clone(),
        port:   settings.port,
        source: Box::new(e),
      })?;

    let driver = tokio::spawn(async move {
      if let Err(e) = connection.await {
        error!("postgres connection closed with error: {e}");
      }
    });

    debug!(host = %settings.endpoint, port = settings.port, "postgres session opened");
    Ok(Self { session: Session::new(client), driver })
  }
}

impl SimpleQuery for Client {
  async fn run(&mut self, sql: &str) -> Result<()> {
    self.batch_execute(sql).await?;
    Ok(())
  }
}

impl Warehouse for PostgresWarehouse {
  type Error = Error;

  async fn execute(&mut self, query: &str, commit: bool) -> Result<()> {
    self.session.execute(query, commit).await
  }

  async fn commit(&mut self) -> Result<()> { self.session.commit().await }

  async fn close(self) -> Result<()> {
    drop(self.session.into_client());
    self.driver.await?;
    debug!("postgres session closed");
    Ok(())
  }
}
