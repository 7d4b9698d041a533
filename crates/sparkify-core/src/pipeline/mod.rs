//! The two warehouse pipelines and the timing record they produce.
//!
//! Both pipelines are a fixed, linear list of statements executed over one
//! borrowed [`Warehouse`]. Every statement is its own transaction: it is
//! committed before the next one runs, and the first failure aborts the rest
//! of the run. Nothing is rolled back, so a failed run can leave the
//! warehouse partially dropped, created or loaded.

mod etl;
mod schema;

use std::time::{Duration, Instant};

use strum::Display;
use tracing::debug;

pub use etl::{EtlPipeline, insert_concurrently};
pub use schema::SchemaPipeline;

use crate::{Error, Result, Warehouse, sql::Statement};

// ─── Phases ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
  Drop,
  Create,
  Load,
  Insert,
}

impl Phase {
  /// Label used in the time statistics summary.
  pub fn label(self) -> &'static str {
    match self {
      Self::Drop => "Drop tables",
      Self::Create => "Create tables",
      Self::Load => "Staging tables",
      Self::Insert => "Insert tables",
    }
  }
}

/// How long one phase took and how many statements it committed.
#[derive(Debug, Clone)]
pub struct PhaseTiming {
  pub phase:      Phase,
  pub statements: usize,
  pub elapsed:    Duration,
}

/// Per-phase timings of a completed pipeline run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
  pub phases: Vec<PhaseTiming>,
}

impl RunStats {
  pub fn total_elapsed(&self) -> Duration {
    self.phases.iter().map(|p| p.elapsed).sum()
  }

  pub fn statements(&self) -> usize {
    self.phases.iter().map(|p| p.statements).sum()
  }

  pub fn phase(&self, phase: Phase) -> Option<&PhaseTiming> {
    self.phases.iter().find(|p| p.phase == phase)
  }
}

// ─── Execution ───────────────────────────────────────────────────────────────

/// Execute `statements` in order, committing after each one.
pub(crate) async fn execute_all<W: Warehouse>(
  conn: &mut W,
  phase: Phase,
  statements: &[Statement],
) -> Result<PhaseTiming> {
  let start = Instant::now();

  for statement in statements {
    debug!(%phase, table = %statement.table, "executing statement");
    conn
      .execute(&statement.sql, true)
      .await
      .map_err(|e| Error::warehouse(phase, statement.table, e))?;
  }

  Ok(PhaseTiming {
    phase,
    statements: statements.len(),
    elapsed: start.elapsed(),
  })
}
