//! Warehouse connection backends for the Sparkify ETL.
//!
//! Two interchangeable clients speak the Postgres wire protocol to the
//! warehouse: [`PostgresWarehouse`] (`tokio-postgres`, the default) and
//! [`RedshiftWarehouse`] (`sqlx`). [`Connection`] picks one at construction
//! time and implements [`sparkify_core::Warehouse`] over either.

mod connection;
mod postgres;
mod redshift;
mod session;

pub mod error;

pub use connection::{Backend, Connection};
pub use error::{Error, Result};
pub use postgres::PostgresWarehouse;
pub use redshift::RedshiftWarehouse;

#[cfg(test)]
mod tests;
