//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the todo and inventory stores.
//! - Apply schema migrations in deterministic order.
//! - Hand out an explicitly constructed, shareable connection handle.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - There is no process-wide connection; every handle is constructed and injected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod handle;
pub mod migrations;
mod open;

pub use handle::Database;
pub use migrations::{Schema, INVENTORY_SCHEMA, TODO_SCHEMA};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be opened or its handle is no longer usable.
    #[error("store unavailable at `{location}`: {reason}")]
    StoreUnavailable { location: String, reason: String },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("{schema} database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        schema: &'static str,
        db_version: u32,
        latest_supported: u32,
    },
}

/// What to do when the on-disk schema has no migration path to this build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationPolicy {
    /// Refuse to open the database.
    #[default]
    Strict,
    /// Drop the schema's tables and recreate them, discarding all rows.
    DestructiveFallback,
}
