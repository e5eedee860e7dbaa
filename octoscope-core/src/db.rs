use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension};

use crate::error::StoreError;
use crate::kv::PersistentKeyValueStore;

/// Opens (or creates) the SQLite database at `path`, configures WAL mode,
/// and applies schema migrations via the `schema_version` table.
///
/// This function is the single entry point for all database connections.
/// `busy_timeout` is set through the `Connection` method rather than a PRAGMA
/// string so it takes effect regardless of pragma caching.
///
/// # Errors
///
/// Returns `rusqlite::Error` if the file cannot be opened, WAL configuration
/// fails, or schema DDL fails.
pub fn open_db(path: impl AsRef<Path>) -> rusqlite::Result<Connection> {
    let mut db = Connection::open(path)?;

    db.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;",
    )?;
    db.busy_timeout(Duration::from_secs(5))?;

    // Fold any WAL left over from a previous run back into the main file.
    db.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;

    crate::schema::migrate(&mut db)?;

    Ok(db)
}

/// Returns the current Unix timestamp in seconds.
fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// [`PersistentKeyValueStore`] over the `kv` table.
///
/// Every `set` is its own `BEGIN IMMEDIATE` transaction, so a returned `Ok`
/// means the value is committed.
pub struct SqliteKvStore {
    db: Connection,
}

impl SqliteKvStore {
    /// Opens the database at `path` via [`open_db`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Sqlite` if the database cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self { db: open_db(path)? })
    }

    /// Wraps an already-open connection. The schema is migrated first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Sqlite` if the migration fails.
    pub fn from_connection(mut db: Connection) -> Result<Self, StoreError> {
        crate::schema::migrate(&mut db)?;
        Ok(Self { db })
    }
}

impl PersistentKeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .db
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                rusqlite::params![key],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let tx = self
            .db
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key)
             DO UPDATE SET value = excluded.value,
                           updated_at = excluded.updated_at",
            rusqlite::params![key, value, now_secs()],
        )?;
        tx.commit()?;
        Ok(())
    }
}
