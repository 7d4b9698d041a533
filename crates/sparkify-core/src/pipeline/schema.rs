//! [`SchemaPipeline`] — drops and recreates every warehouse table.

use tracing::info;

use super::{Phase, PhaseTiming, RunStats, execute_all};
use crate::{
  Result, Warehouse,
  sql::{CREATE_TABLE_QUERIES, DROP_TABLE_QUERIES},
};

/// Resets the warehouse schema.
///
/// **Destructive.** [`run`](Self::run) drops every staging, fact and
/// dimension table before recreating it, without checking for existing data
/// and without asking. Each DROP and CREATE is committed on its own, so a
/// failure part-way leaves some tables dropped and others intact.
///
/// ```rust,ignore
/// let mut conn = Connection::connect(&settings, Backend::Postgres).await?;
/// SchemaPipeline::new(&mut conn).run().await?;
/// conn.close().await?;
/// ```
pub struct SchemaPipeline<'c, W> {
  conn: &'c mut W,
}

impl<'c, W: Warehouse> SchemaPipeline<'c, W> {
  pub fn new(conn: &'c mut W) -> Self { Self { conn } }

  /// Execute every DROP statement in table order.
  pub async fn drop(&mut self) -> Result<PhaseTiming> {
    execute_all(self.conn, Phase::Drop, &DROP_TABLE_QUERIES).await
  }

  /// Execute every CREATE statement in table order.
  pub async fn create(&mut self) -> Result<PhaseTiming> {
    execute_all(self.conn, Phase::Create, &CREATE_TABLE_QUERIES).await
  }

  /// Drop, then create.
  pub async fn run(&mut self) -> Result<RunStats> {
    info!("Dropping the database tables...");
    let dropped = self.drop().await?;
    info!("Database tables dropped.");

    info!("Creating the database schema...");
    let created = self.create().await?;
    info!("Database schema created.");

    Ok(RunStats { phases: vec![dropped, created] })
  }
}
