//! Process-wide SQLite connection shared by every record store.
//!
//! The backend opens exactly one connection at start-up, switches foreign-key
//! enforcement on, and hands clones of [`DbConnection`] to each store. The
//! connection lives until the last clone is dropped at process exit.
//!
//! # Design
//!
//! - Uses `diesel-async`'s `SyncConnectionWrapper` so Diesel's synchronous
//!   SQLite connection runs on blocking threads without stalling the runtime
//! - A `tokio` mutex serialises access; every store operation is a single
//!   statement executed while the lock is held
//! - All errors are mapped to [`ConnectionError`] variants

use std::path::Path;
use std::sync::Arc;

use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Async-capable SQLite connection.
pub type AsyncSqliteConnection = SyncConnectionWrapper<SqliteConnection>;

/// In-memory database URL, handy for tests.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Errors that can occur while opening the shared connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The database file or its parent directory could not be prepared.
    #[error("failed to prepare database path {path}: {message}")]
    Path { path: String, message: String },

    /// SQLite refused the connection.
    #[error("failed to open database connection: {message}")]
    Open { message: String },

    /// A connection-level pragma failed.
    #[error("failed to configure database connection: {message}")]
    Configure { message: String },
}

impl ConnectionError {
    /// Create an open error with the given message.
    pub fn open(message: impl Into<String>) -> Self {
        Self::Open {
            message: message.into(),
        }
    }

    /// Create a configuration error with the given message.
    pub fn configure(message: impl Into<String>) -> Self {
        Self::Configure {
            message: message.into(),
        }
    }
}

/// Configuration for the shared database connection.
///
/// # Example
///
/// ```
/// use carlot::outbound::persistence::ConnectionConfig;
///
/// let config = ConnectionConfig::new("data/carlot.db");
/// assert_eq!(config.database_url(), "data/carlot.db");
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    database_url: String,
}

impl ConnectionConfig {
    /// Create a new configuration for the given database path.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Configuration for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_DATABASE)
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn is_in_memory(&self) -> bool {
        self.database_url == IN_MEMORY_DATABASE || self.database_url.starts_with("file::memory:")
    }
}

/// Shared handle to the single SQLite connection.
///
/// # Example
///
/// ```no_run
/// use carlot::outbound::persistence::{ConnectionConfig, DbConnection};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let db = DbConnection::open(ConnectionConfig::in_memory()).await?;
/// let mut conn = db.lock().await;
/// // Use conn for Diesel operations...
/// # drop(conn);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DbConnection {
    inner: Arc<Mutex<AsyncSqliteConnection>>,
}

impl DbConnection {
    /// Open the connection described by `config`.
    ///
    /// File-backed databases get their parent directory created first.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] when the path cannot be prepared or SQLite
    /// refuses the connection or its foreign-key pragma.
    pub async fn open(config: ConnectionConfig) -> Result<Self, ConnectionError> {
        if !config.is_in_memory() {
            prepare_parent_dir(config.database_url())?;
        }

        let mut connection = AsyncSqliteConnection::establish(config.database_url())
            .await
            .map_err(|err| ConnectionError::open(err.to_string()))?;

        connection
            .batch_execute("PRAGMA foreign_keys = ON;")
            .await
            .map_err(|err| ConnectionError::configure(err.to_string()))?;
        debug!("foreign key enforcement enabled");

        info!(database = config.database_url(), "database connection opened");
        Ok(Self {
            inner: Arc::new(Mutex::new(connection)),
        })
    }

    /// Wait for exclusive use of the connection.
    pub async fn lock(&self) -> MutexGuard<'_, AsyncSqliteConnection> {
        self.inner.lock().await
    }
}

fn prepare_parent_dir(database_url: &str) -> Result<(), ConnectionError> {
    let Some(parent) = Path::new(database_url).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| ConnectionError::Path {
        path: database_url.to_owned(),
        message: err.to_string(),
    })
}
