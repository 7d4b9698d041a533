//! Shared plumbing for the `create-tables` and `etl` binaries.
//!
//! Both binaries read `aws.ini` from the working directory, open one
//! warehouse connection, run their pipeline over it and log a time summary.
//!
//! ```text
//! create-tables              # tokio-postgres client
//! etl --redshift             # sqlx client
//! RUST_LOG=debug etl         # per-statement detail
//! ```

use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use sparkify_core::{RunStats, Settings};
use sparkify_warehouse::{Backend, Connection};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Sparkify Redshift warehouse pipelines")]
pub struct Cli {
  /// Talk to the warehouse through the sqlx client instead of the default
  /// tokio-postgres one.
  #[arg(long)]
  pub redshift: bool,
}

impl Cli {
  pub fn backend(&self) -> Backend { Backend::from_flag(self.redshift) }
}

// ─── Startup ──────────────────────────────────────────────────────────────────

/// Install the fmt subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();
}

pub fn load_settings(path: impl AsRef<Path>) -> anyhow::Result<Settings> {
  let path = path.as_ref();
  Settings::load(path)
    .with_context(|| format!("failed to read settings from {}", path.display()))
}

pub async fn connect(settings: &Settings, backend: Backend) -> anyhow::Result<Connection> {
  let conn = Connection::connect(settings, backend)
    .await
    .with_context(|| format!("failed to connect to the warehouse ({backend})"))?;
  info!(%backend, "Connection established.");
  Ok(conn)
}

// ─── Reporting ────────────────────────────────────────────────────────────────

/// One line per phase, e.g. `Drop tables time: 0.42 seconds`, then the
/// total.
pub fn time_statistics(stats: &RunStats) -> Vec<String> {
  let mut lines: Vec<String> = stats
    .phases
    .iter()
    .map(|timing| {
      format!(
        "{} time: {:.2} seconds",
        timing.phase.label(),
        timing.elapsed.as_secs_f64()
      )
    })
    .collect();
  lines.push(format!(
    "Total time: {:.2} seconds",
    stats.total_elapsed().as_secs_f64()
  ));
  lines
}

pub fn report(stats: &RunStats) {
  info!("Time Statistics");
  for line in time_statistics(stats) {
    info!("{line}");
  }
}

#[cfg(test)]
mod tests;
