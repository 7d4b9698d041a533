//! `create-tables` — drops and recreates every Sparkify warehouse table.
//!
//! Destructive: all staging, fact and dimension tables are dropped first.

use anyhow::Context as _;
use clap::Parser;
use sparkify_cli::Cli;
use sparkify_core::{SchemaPipeline, Settings, Warehouse as _};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  sparkify_cli::init_tracing();

  let cli = Cli::parse();
  let settings = sparkify_cli::load_settings(Settings::DEFAULT_PATH)?;
  let mut conn = sparkify_cli::connect(&settings, cli.backend()).await?;
  info!(backend = %conn.backend(), "Redshift schema pipeline");

  let stats = SchemaPipeline::new(&mut conn)
    .run()
    .await
    .context("schema pipeline failed")?;

  conn.close().await.context("failed to close the warehouse connection")?;
  sparkify_cli::report(&stats);
  Ok(())
}
