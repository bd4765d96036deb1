//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain record store
//! port backed by a single SQLite database file, driven through
//! `diesel-async`'s `SyncConnectionWrapper`.
//!
//! # Architecture
//!
//! - **Thin adapters**: store implementations only translate between Diesel
//!   rows and domain types. Validation lives in the domain service.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One connection**: every store shares a [`DbConnection`] and holds its
//!   lock for the duration of an operation.
//! - **Strongly typed errors**: Diesel errors are mapped to
//!   [`StoreError`](crate::domain::ports::StoreError).
//!
//! # Example
//!
//! ```no_run
//! use carlot::outbound::persistence::{ConnectionConfig, DbConnection, DieselCarStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DbConnection::open(ConnectionConfig::new("data/carlot.db")).await?;
//! let cars = DieselCarStore::new(db);
//! # drop(cars);
//! # Ok(())
//! # }
//! ```

mod connection;
mod diesel_car_store;
mod diesel_error_mapping;
mod diesel_user_store;
mod models;
mod schema;

pub use connection::{
    AsyncSqliteConnection, ConnectionConfig, ConnectionError, DbConnection, IN_MEMORY_DATABASE,
};
pub use diesel_car_store::DieselCarStore;
pub use diesel_user_store::DieselUserStore;

/// SQLite expression for the next `updated_at` stamp of a row.
///
/// Yields the current UTC time with millisecond precision, or one millisecond
/// past the row's previous stamp when the clock has not moved on, so every
/// write strictly advances `updated_at`. The format matches the column
/// defaults so stamps compare cleanly as text.
const SQLITE_NEXT_STAMP: &str = "max(\
    strftime('%Y-%m-%d %H:%M:%f', 'now'), \
    strftime('%Y-%m-%d %H:%M:%f', updated_at, '+0.001 seconds'))";
