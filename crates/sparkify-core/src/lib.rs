//! Core types and trait definitions for the Sparkify warehouse ETL.
//!
//! This crate is deliberately free of network and database dependencies.
//! Backends (`sparkify-warehouse`) and the storage loader (`sparkify-s3`)
//! depend on it; it depends on nothing they provide.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod pipeline;
pub mod settings;
pub mod sql;
pub mod warehouse;

pub use error::{Error, Result};
pub use pipeline::{EtlPipeline, Phase, PhaseTiming, RunStats, SchemaPipeline};
pub use settings::Settings;
pub use warehouse::Warehouse;
