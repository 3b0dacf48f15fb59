//! Single-connection SQLite storage handle for the Diesel adapters.
//!
//! The handle owns exactly one `diesel-async` connection wrapped around a
//! synchronous `SqliteConnection`. Callers check it out through a Tokio mutex,
//! so statements issued by the repositories never interleave. Opening the
//! handle bootstraps the schema; closing it releases the connection and any
//! later checkout reports [`StorageError::Closed`].

use std::sync::Arc;

use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, info};

/// Async Diesel connection over SQLite.
pub type SqliteAsyncConnection = SyncConnectionWrapper<SqliteConnection>;

/// Checked-out connection; the handle stays locked until this is dropped.
pub type StorageConnection<'a> = MappedMutexGuard<'a, SqliteAsyncConnection>;

/// In-memory database path understood by SQLite.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Table definitions applied on every open. Both statements are idempotent.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE,
    password TEXT
);
CREATE TABLE IF NOT EXISTS data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    username TEXT,
    date TEXT,
    distance REAL,
    electricity REAL,
    waste REAL,
    meals INTEGER,
    total_emissions REAL,
    FOREIGN KEY (user_id) REFERENCES users (id)
);
";

/// Errors raised while managing the storage lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The database file could not be opened or created.
    #[error("failed to open database at {path}: {message}")]
    Open { path: String, message: String },

    /// The schema bootstrap statements failed.
    #[error("failed to create schema: {message}")]
    Schema { message: String },

    /// The handle has been closed.
    #[error("storage handle is closed")]
    Closed,
}

impl StorageError {
    /// Create an open error for `path`.
    pub fn open(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a schema error with the given message.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}

/// Where the storage handle keeps its data.
///
/// # Example
///
/// ```
/// use footprint::outbound::persistence::StorageConfig;
///
/// let config = StorageConfig::new("carbon_calculator.db");
/// assert_eq!(config.database_path(), "carbon_calculator.db");
/// assert!(StorageConfig::in_memory().is_in_memory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    database_path: String,
}

impl StorageConfig {
    /// Use the SQLite database at `database_path`, creating it when absent.
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Use a private in-memory database that lives as long as the handle.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_DATABASE)
    }

    /// Get the database path.
    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    /// Whether the configuration targets an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }
}

/// Shared handle to the single SQLite connection.
///
/// Clones refer to the same connection. The handle must be opened with
/// [`StorageHandle::open`] before use and should be closed with
/// [`StorageHandle::close`] at shutdown.
///
/// # Example
///
/// ```ignore
/// let storage = StorageHandle::open(StorageConfig::in_memory()).await?;
/// let users = DieselUserRepository::new(storage.clone());
/// // ...
/// storage.close().await;
/// ```
#[derive(Clone)]
pub struct StorageHandle {
    inner: Arc<Mutex<Option<SqliteAsyncConnection>>>,
}

impl StorageHandle {
    /// Open the database and ensure the `users` and `data` tables exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] when the database cannot be opened and
    /// [`StorageError::Schema`] when the bootstrap statements fail.
    pub async fn open(config: StorageConfig) -> Result<Self, StorageError> {
        let path = config.database_path();
        let mut conn = SqliteAsyncConnection::establish(path)
            .await
            .map_err(|err| StorageError::open(path, err.to_string()))?;

        conn.batch_execute(SCHEMA_SQL)
            .await
            .map_err(|err| StorageError::schema(err.to_string()))?;
        debug!(database = path, "schema ensured");
        info!(database = path, "storage opened");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(conn))),
        })
    }

    /// Check out the connection, waiting for any statement in flight.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Closed`] after [`StorageHandle::close`].
    pub async fn connection(&self) -> Result<StorageConnection<'_>, StorageError> {
        MutexGuard::try_map(self.inner.lock().await, Option::as_mut)
            .map_err(|_| StorageError::Closed)
    }

    /// Release the connection. Closing twice is a no-op.
    pub async fn close(&self) {
        if self.inner.lock().await.take().is_some() {
            info!("storage closed");
        }
    }

    /// Whether the handle still holds its connection.
    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_keeps_database_path() {
        let config = StorageConfig::new("/tmp/footprint.db");

        assert_eq!(config.database_path(), "/tmp/footprint.db");
        assert!(!config.is_in_memory());
    }

    #[rstest]
    fn storage_error_display() {
        let open = StorageError::open("/missing/dir/db", "unable to open database file");
        let schema = StorageError::schema("near \"TABLE\": syntax error");

        assert!(open.to_string().contains("/missing/dir/db"));
        assert!(schema.to_string().contains("syntax error"));
        assert_eq!(StorageError::Closed.to_string(), "storage handle is closed");
    }

    #[rstest]
    #[tokio::test]
    async fn closed_handle_refuses_checkout() {
        let storage = StorageHandle::open(StorageConfig::in_memory())
            .await
            .expect("in-memory database opens");
        assert!(storage.is_open().await);

        storage.close().await;
        storage.close().await;

        assert!(!storage.is_open().await);
        assert!(matches!(
            storage.connection().await,
            Err(StorageError::Closed)
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn open_fails_for_unreachable_path() {
        let result = StorageHandle::open(StorageConfig::new(
            "/nonexistent-footprint-dir/nested/carbon.db",
        ))
        .await;

        assert!(matches!(result, Err(StorageError::Open { .. })));
    }
}
