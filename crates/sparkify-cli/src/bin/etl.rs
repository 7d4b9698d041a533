//! `etl` — loads the staging tables from S3 and fills the star schema.
//!
//! Run `create-tables` first; the tables must exist.

use anyhow::Context as _;
use clap::Parser;
use sparkify_cli::Cli;
use sparkify_core::{EtlPipeline, Settings, Warehouse as _};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  sparkify_cli::init_tracing();

  let cli = Cli::parse();
  let settings = sparkify_cli::load_settings(Settings::DEFAULT_PATH)?;
  let mut conn = sparkify_cli::connect(&settings, cli.backend()).await?;
  info!(backend = %conn.backend(), "Redshift ETL pipeline");

  let stats = EtlPipeline::new(&mut conn, &settings)
    .run()
    .await
    .context("ETL pipeline failed")?;

  conn.close().await.context("failed to close the warehouse connection")?;
  sparkify_cli::report(&stats);
  Ok(())
}
