//! Error types for `sparkify-core`.

use thiserror::Error;

use crate::{pipeline::Phase, sql::Table};

#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  /// A statement (or the connection it needed) failed during a pipeline
  /// phase. Statements after it in the phase were not executed.
  #[error("{phase} phase failed on table {table}: {source}")]
  Warehouse {
    phase:  Phase,
    table:  Table,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  pub(crate) fn warehouse<E>(phase: Phase, table: Table, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Warehouse { phase, table, source: Box::new(source) }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
