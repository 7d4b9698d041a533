//! Transaction bookkeeping and connection failure tests.
//!
//! Nothing here needs a live warehouse: the session logic is driven through a
//! fake client, and connect errors are provoked against a closed local port.

use sparkify_core::{
  Settings, Warehouse,
  settings::{AwsSettings, IamSettings, RedshiftSettings, S3Settings},
};

use crate::{
  Backend, Connection, Error, PostgresWarehouse, RedshiftWarehouse, Result,
  session::{Session, SimpleQuery},
};

// ─── Fake client ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct ScriptedClient {
  sent:    Vec<String>,
  fail_on: Option<&'static str>,
}

impl SimpleQuery for ScriptedClient {
  async fn run(&mut self, sql: &str) -> Result<()> {
    if self.fail_on == Some(sql) {
      return Err(Error::Sqlx(sqlx::Error::Protocol(format!("rejected: {sql}"))));
    }
    self.sent.push(sql.to_owned());
    Ok(())
  }
}

fn session() -> Session<ScriptedClient> { Session::new(ScriptedClient::default()) }

// ─── Session ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn execute_with_commit_wraps_statement_in_transaction() {
  let mut s = session();

  s.execute("DROP TABLE IF EXISTS users;", true).await.unwrap();

  assert!(!s.in_transaction());
  assert_eq!(
    s.into_client().sent,
    ["BEGIN", "DROP TABLE IF EXISTS users;", "COMMIT"]
  );
}

#[tokio::test]
async fn uncommitted_statements_share_one_transaction() {
  let mut s = session();

  s.execute("INSERT INTO a VALUES (1);", false).await.unwrap();
  s.execute("INSERT INTO b VALUES (2);", false).await.unwrap();
  assert!(s.in_transaction());
  s.commit().await.unwrap();

  assert_eq!(
    s.into_client().sent,
    ["BEGIN", "INSERT INTO a VALUES (1);", "INSERT INTO b VALUES (2);", "COMMIT"]
  );
}

#[tokio::test]
async fn commit_without_pending_transaction_is_a_no_op() {
  let mut s = session();
  s.commit().await.unwrap();
  assert!(s.into_client().sent.is_empty());
}

#[tokio::test]
async fn each_committed_statement_gets_its_own_transaction() {
  let mut s = session();
  s.execute("CREATE TABLE a (x INT);", true).await.unwrap();
  s.execute("CREATE TABLE b (x INT);", true).await.unwrap();

  let sent = s.into_client().sent;
  assert_eq!(sent.iter().filter(|q| *q == "BEGIN").count(), 2);
  assert_eq!(sent.iter().filter(|q| *q == "COMMIT").count(), 2);
}

#[tokio::test]
async fn failed_statement_is_not_committed() {
  let mut s = Session::new(ScriptedClient {
    fail_on: Some("COPY staging_songs;"),
    ..ScriptedClient::default()
  });

  let err = s.execute("COPY staging_songs;", true).await.unwrap_err();

  assert!(matches!(err, Error::Sqlx(_)));
  assert!(s.in_transaction());
  assert_eq!(s.into_client().sent, ["BEGIN"]);
}

// ─── Backend selection ───────────────────────────────────────────────────────

fn assert_warehouse<W: Warehouse + 'static>() {}

#[test]
fn every_backend_is_a_warehouse() {
  assert_warehouse::<PostgresWarehouse>();
  assert_warehouse::<RedshiftWarehouse>();
  assert_warehouse::<Connection>();
}

#[test]
fn backend_follows_redshift_flag() {
  assert_eq!(Backend::from_flag(false), Backend::Postgres);
  assert_eq!(Backend::from_flag(true), Backend::Redshift);
  assert_eq!(Backend::default(), Backend::Postgres);
  assert_eq!(Backend::Redshift.to_string(), "redshift");
}

// ─── Connect failures ────────────────────────────────────────────────────────

/// A port on localhost that nothing is listening on.
async fn closed_port() -> u16 {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  listener.local_addr().unwrap().port()
}

fn settings(port: u16) -> Settings {
  Settings {
    aws:      AwsSettings {
      region: "us-west-2".into(),
      key:    "key".into(),
      secret: "secret".into(),
    },
    redshift: RedshiftSettings {
      endpoint: "127.0.0.1".into(),
      port,
      database: "dev".into(),
      user:     "awsuser".into(),
      password: "password".into(),
    },
    s3:       S3Settings {
      log_data:  "s3://bucket/log_data".into(),
      song_data: "s3://bucket/song_data".into(),
    },
    iam:      IamSettings { redshift_role_arn: "arn:aws:iam::0:role/r".into() },
  }
}

#[tokio::test]
async fn postgres_connect_refused_is_a_connect_error() {
  let settings = settings(closed_port().await);

  let err = PostgresWarehouse::connect(&settings.redshift).await.err().unwrap();

  assert!(matches!(err, Error::Connect { port, .. } if port == settings.redshift.port));
}

#[tokio::test]
async fn redshift_connect_refused_is_a_connect_error() {
  let settings = settings(closed_port().await);

  let err = RedshiftWarehouse::connect(&settings.redshift).await.err().unwrap();

  assert!(matches!(err, Error::Connect { .. }));
}

#[tokio::test]
async fn connection_surfaces_backend_connect_error() {
  let settings = settings(closed_port().await);

  for backend in [Backend::Postgres, Backend::Redshift] {
    let result = Connection::connect(&settings, backend).await;
    assert!(matches!(result, Err(Error::Connect { .. })), "{backend}");
  }
}
