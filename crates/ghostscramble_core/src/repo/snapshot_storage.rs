//! Key-value storage for the serialized session snapshot.
//!
//! # Responsibility
//! - Provide a single-entry read/replace contract over durable storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A write fully replaces the previous value for the key.
//! - Reading a missing key yields `None`, not an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the session snapshot.
pub const SESSIONS_KEY: &str = "ghostScrambleSessions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for snapshot storage and session store operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Snapshot could not be encoded.
    Serialization(String),
    /// Stored snapshot could not be decoded.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(message) => write!(f, "failed to encode snapshot: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Application-scoped key-value store.
pub trait SnapshotStorage {
    fn read(&self, key: &str) -> RepoResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for &T {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write(key, value)
    }
}

/// SQLite-backed storage over the `app_kv` table.
pub struct SqliteSnapshotStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotStorage<'conn> {
    /// Expects a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotStorage for SqliteSnapshotStorage<'_> {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_kv WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO app_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local storage, mainly for tests and ephemeral front-ends.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl InMemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw text under `key`, bypassing serialization.
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.into());
        storage
    }
}

impl SnapshotStorage for InMemorySnapshotStorage {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
