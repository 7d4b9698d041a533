use std::{io::Write as _, time::Duration};

use clap::Parser;
use sparkify_core::{Phase, PhaseTiming, RunStats};
use sparkify_warehouse::Backend;

use crate::{Cli, connect, load_settings, time_statistics};

const LOCAL_INI: &str = "\
[AWS]
REGION = us-west-2
KEY = AKIAEXAMPLE
SECRET = shhh

[REDSHIFT]
ENDPOINT = 127.0.0.1
PORT = 1
DATABASE = dev
USER = awsuser
PASSWORD = hunter2

[S3]
LOG_DATA = s3://udacity-dend/log_data
SONG_DATA = s3://udacity-dend/song_data

[IAM]
REDSHIFT_ROLE_ARN = arn:aws:iam::123456789012:role/dwhRole
";

fn timing(phase: Phase, millis: u64) -> PhaseTiming {
  PhaseTiming {
    phase,
    statements: 7,
    elapsed: Duration::from_millis(millis),
  }
}

// ─── Args ─────────────────────────────────────────────────────────────────────

#[test]
fn redshift_flag_selects_the_backend() {
  let cli = Cli::try_parse_from(["etl"]).unwrap();
  assert!(!cli.redshift);
  assert_eq!(cli.backend(), Backend::Postgres);

  let cli = Cli::try_parse_from(["etl", "--redshift"]).unwrap();
  assert_eq!(cli.backend(), Backend::Redshift);
}

#[test]
fn no_other_arguments_are_accepted() {
  assert!(Cli::try_parse_from(["etl", "--config", "aws.ini"]).is_err());
  assert!(Cli::try_parse_from(["create-tables", "extra"]).is_err());
}

// ─── Startup ──────────────────────────────────────────────────────────────────

#[test]
fn missing_settings_file_names_the_path() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("aws.ini");

  let err = load_settings(&path).unwrap_err();
  assert!(err.to_string().contains("aws.ini"), "{err:#}");
}

#[tokio::test]
async fn connect_failure_names_the_backend() {
  let mut file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
  file.write_all(LOCAL_INI.as_bytes()).unwrap();
  let settings = load_settings(file.path()).unwrap();

  let err = connect(&settings, Backend::Redshift).await.err().unwrap();
  assert_eq!(err.to_string(), "failed to connect to the warehouse (redshift)");
}

// ─── Reporting ────────────────────────────────────────────────────────────────

#[test]
fn time_statistics_round_to_two_decimals() {
  let stats = RunStats {
    phases: vec![timing(Phase::Load, 1234), timing(Phase::Insert, 7)],
  };

  assert_eq!(
    time_statistics(&stats),
    [
      "Staging tables time: 1.23 seconds",
      "Insert tables time: 0.01 seconds",
      "Total time: 1.24 seconds",
    ]
  );
}

#[test]
fn time_statistics_of_a_schema_run() {
  let stats = RunStats {
    phases: vec![timing(Phase::Drop, 0), timing(Phase::Create, 2500)],
  };

  assert_eq!(
    time_statistics(&stats),
    [
      "Drop tables time: 0.00 seconds",
      "Create tables time: 2.50 seconds",
      "Total time: 2.50 seconds",
    ]
  );
}
