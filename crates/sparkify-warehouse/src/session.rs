//! Implicit-transaction bookkeeping shared by both backends.

use std::future::Future;

use crate::Result;

/// A client that can run one statement over the simple query protocol.
pub(crate) trait SimpleQuery: Send {
  fn run<'a>(&'a mut self, sql: &'a str) -> impl Future<Output = Result<()>> + Send + 'a;
}

/// Wraps a client with the transaction model the pipelines expect: the first
/// statement after a commit opens a transaction, which stays pending until
/// committed.
pub(crate) struct Session<C> {
  client:         C,
  in_transaction: bool,
}

impl<C: SimpleQuery> Session<C> {
  pub(crate) fn new(client: C) -> Self {
    Self { client, in_transaction: false }
  }

  pub(crate) fn in_transaction(&self) -> bool { self.in_transaction }

  pub(crate) async fn execute(&mut self, query: &str, commit: bool) -> Result<()> {
    if !self.in_transaction {
      self.client.run("BEGIN").await?;
      self.in_transaction = true;
    }
    self.client.run(query).await?;
    if commit {
      self.commit().await?;
    }
    Ok(())
  }

  pub(crate) async fn commit(&mut self) -> Result<()> {
    if self.in_transaction {
      self.client.run("COMMIT").await?;
      self.in_transaction = false;
    }
    Ok(())
  }

  /// Give back the client. A pending transaction is left for the server to
  /// discard when the session ends.
  pub(crate) fn into_client(self) -> C { self.client }
}
