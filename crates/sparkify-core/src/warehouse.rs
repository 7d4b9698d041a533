//! The `Warehouse` trait — the connection surface the pipelines drive.
//!
//! The trait is implemented by the backends in `sparkify-warehouse`. The
//! pipelines depend on this abstraction, not on any concrete client.

use std::future::Future;

/// A session against the analytical warehouse.
///
/// Statements run inside an implicit transaction that is opened by the first
/// `execute` after a commit and stays pending until `commit` is called (or
/// `execute` is asked to commit). Implementations are not reentrant: one
/// statement at a time, which `&mut self` enforces.
pub trait Warehouse: Send {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Run `query` and, when `commit` is set, commit the pending transaction
  /// straight after it.
  fn execute<'a>(
    &'a mut self,
    query: &'a str,
    commit: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Commit the pending transaction. A no-op when nothing is pending.
  fn commit(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// End the session. Anything not yet committed is discarded.
  fn close(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
