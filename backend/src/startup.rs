//! Storage initialisation run before the HTTP listener is bound.
//!
//! The order is fixed: open the shared connection, create every table, then
//! (development only) seed every table. Seeding is count-gated per table, so
//! running it on every start is safe.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{RecordStore, StoreError};
use crate::domain::{Car, User};
use crate::outbound::persistence::{
    ConnectionConfig, ConnectionError, DbConnection, DieselCarStore, DieselUserStore,
};

/// Errors returned while preparing storage.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The database connection could not be opened.
    #[error("database connection failed: {0}")]
    Connection(#[from] ConnectionError),
    /// Table creation or seeding failed.
    #[error("storage initialisation failed: {0}")]
    Store(#[from] StoreError),
}

/// Number of sample records inserted per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Users inserted.
    pub users: usize,
    /// Cars inserted.
    pub cars: usize,
}

/// Record stores sharing one initialised connection.
#[derive(Clone)]
pub struct Storage {
    /// User record store.
    pub users: Arc<DieselUserStore>,
    /// Car record store.
    pub cars: Arc<DieselCarStore>,
}

/// Create all tables, then seed them when `seed` is set.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised; later steps are not attempted.
pub async fn initialise_storage(
    users: &dyn RecordStore<User>,
    cars: &dyn RecordStore<Car>,
    seed: bool,
) -> Result<SeedReport, StoreError> {
    users.create_table().await?;
    cars.create_table().await?;

    if !seed {
        info!(reason = "not development", "sample data seeding skipped");
        return Ok(SeedReport::default());
    }

    let report = SeedReport {
        users: users.seed().await?,
        cars: cars.seed().await?,
    };
    info!(users = report.users, cars = report.cars, "sample data seeding finished");
    Ok(report)
}

/// Open the database described by `config` and initialise both stores.
///
/// # Examples
///
/// ```no_run
/// use carlot::outbound::persistence::ConnectionConfig;
/// use carlot::startup::open_storage;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = open_storage(ConnectionConfig::new("data/carlot.db"), true).await?;
/// # drop(storage);
/// # Ok(())
/// # }
/// ```
pub async fn open_storage(config: ConnectionConfig, seed: bool) -> Result<Storage, StartupError> {
    let db = DbConnection::open(config).await?;
    let storage = Storage {
        users: Arc::new(DieselUserStore::new(db.clone())),
        cars: Arc::new(DieselCarStore::new(db)),
    };
    initialise_storage(storage.users.as_ref(), storage.cars.as_ref(), seed).await?;
    Ok(storage)
}
