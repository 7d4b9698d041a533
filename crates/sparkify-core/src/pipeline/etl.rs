//! [`EtlPipeline`] — bulk-loads the staging tables and derives the star
//! schema from them.

use std::{future::Future, time::Instant};

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{Phase, PhaseTiming, RunStats, execute_all};
use crate::{
  Error, Result, Settings, Warehouse,
  sql::{INSERT_TABLE_QUERIES, Statement, copy_table_queries},
};

/// Loads `staging_events`/`staging_songs` from S3 and inserts into
/// `songplays`, `users`, `songs`, `artists` and `time`.
///
/// Assumes the tables already exist (see
/// [`SchemaPipeline`](super::SchemaPipeline)). Inserts never delete first, so
/// running twice without a schema reset duplicates the derived rows.
pub struct EtlPipeline<'c, W> {
  conn:   &'c mut W,
  copies: [Statement; 2],
}

impl<'c, W: Warehouse> EtlPipeline<'c, W> {
  pub fn new(conn: &'c mut W, settings: &Settings) -> Self {
    Self { conn, copies: copy_table_queries(settings) }
  }

  /// Execute both COPY statements, one per staging table.
  pub async fn load(&mut self) -> Result<PhaseTiming> {
    execute_all(self.conn, Phase::Load, &self.copies).await
  }

  /// Execute every INSERT statement in order: songplays, users, songs,
  /// artists, time.
  pub async fn insert(&mut self) -> Result<PhaseTiming> {
    execute_all(self.conn, Phase::Insert, &INSERT_TABLE_QUERIES).await
  }

  /// Load, then insert.
  pub async fn run(&mut self) -> Result<RunStats> {
    info!("Loading S3 data into staging tables...");
    let loaded = self.load().await?;
    info!("Staging tables loaded.");

    info!("Inserting data into DW tables...");
    let inserted = self.insert().await?;
    info!("DW tables loaded.");

    Ok(RunStats { phases: vec![loaded, inserted] })
  }
}

/// Run the five INSERT statements concurrently, each over its own connection.
///
/// The inserts read only from the staging tables and write disjoint targets,
/// so their order carries no dependency. `connect` is called once per
/// statement; each statement is committed and its connection closed before
/// the phase completes. Every insert is awaited even when one fails, and the
/// first failure in statement order is returned.
pub async fn insert_concurrently<F, Fut, W>(connect: F) -> Result<PhaseTiming>
where
  F: Fn() -> Fut,
  Fut: Future<Output = Result<W, W::Error>>,
  W: Warehouse,
{
  let start = Instant::now();

  let tasks = INSERT_TABLE_QUERIES.iter().map(|statement| {
    let connecting = connect();
    async move {
      let mut conn = connecting
        .await
        .map_err(|e| Error::warehouse(Phase::Insert, statement.table, e))?;
      debug!(table = %statement.table, "executing statement");
      conn
        .execute(&statement.sql, true)
        .await
        .map_err(|e| Error::warehouse(Phase::Insert, statement.table, e))?;
      conn
        .close()
        .await
        .map_err(|e| Error::warehouse(Phase::Insert, statement.table, e))
    }
  });

  let mut first = None;
  for outcome in join_all(tasks).await {
    if let Err(e) = outcome {
      if first.is_none() {
        first = Some(e);
      } else {
        warn!("additional concurrent insert failure: {e}");
      }
    }
  }

  match first {
    Some(e) => Err(e),
    None => Ok(PhaseTiming {
      phase:      Phase::Insert,
      statements: INSERT_TABLE_QUERIES.len(),
      elapsed:    start.elapsed(),
    }),
  }
}
