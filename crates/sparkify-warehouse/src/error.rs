//! Error type for `sparkify-warehouse`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("could not connect to {host}:{port}: {source}")]
  Connect {
    host:   String,
    port:   u16,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("postgres error: {0}")]
  Postgres(#[from] tokio_postgres::Error),

  #[error("sqlx error: {0}")]
  Sqlx(#[from] sqlx::Error),

  /// The background task driving a `tokio-postgres` session panicked or was
  /// cancelled.
  #[error("connection task failed: {0}")]
  Closed(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
