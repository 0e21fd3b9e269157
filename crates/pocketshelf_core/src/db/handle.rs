//! Shared connection handle injected into state holders.
//!
//! # Responsibility
//! - Own one migrated connection behind a mutex so it can cross task boundaries.
//! - Run blocking SQL work on tokio's blocking pool.
//!
//! # Invariants
//! - The mutex is held only for the duration of one closure.
//! - A poisoned lock or a failed background task surfaces as `StoreUnavailable`.

use super::migrations::Schema;
use super::{open_db, open_db_in_memory, DbError, DbResult, MigrationPolicy};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Cloneable handle to one store's database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    schema: &'static Schema,
    location: Arc<str>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("schema", &self.schema.name())
            .field("location", &self.location)
            .finish()
    }
}

impl Database {
    /// Opens (and migrates) a database file for `schema`.
    pub fn open(
        path: impl AsRef<Path>,
        schema: &'static Schema,
        policy: MigrationPolicy,
    ) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = open_db(path, schema, policy)?;
        Ok(Self::from_connection(
            conn,
            schema,
            path.display().to_string(),
        ))
    }

    /// Opens a private in-memory database for `schema`.
    pub fn open_in_memory(schema: &'static Schema) -> DbResult<Self> {
        let conn = open_db_in_memory(schema)?;
        Ok(Self::from_connection(conn, schema, ":memory:"))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(
        conn: Connection,
        schema: &'static Schema,
        location: impl Into<String>,
    ) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            schema,
            location: Arc::from(location.into()),
        }
    }

    /// Runs `f` with exclusive access to the connection on the current thread.
    pub fn with_conn<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| self.unavailable("connection lock poisoned"))?;
        f(&guard)
    }

    /// Runs `f` on the blocking pool and awaits its result.
    pub async fn run<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DbError> + Send + 'static,
    {
        let handle = self.clone();
        match tokio::task::spawn_blocking(move || handle.with_conn(f)).await {
            Ok(result) => result,
            Err(err) => Err(self
                .unavailable(&format!("background task failed: {err}"))
                .into()),
        }
    }

    fn unavailable(&self, reason: &str) -> DbError {
        DbError::StoreUnavailable {
            location: self.location.to_string(),
            reason: reason.to_string(),
        }
    }
}
