//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the narrow data access contract of each store.
//! - Isolate SQLite query details from state holders.
//!
//! # Invariants
//! - Updates on a missing id fail with `NotFound` and change nothing.
//! - Deletes on a missing id are no-ops that report `false`.
//! - Writes return the stored record so callers never re-read the table.

use crate::db::DbError;
use thiserror::Error;

pub mod item_repo;
pub mod todo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by both stores.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("record not found: {0}")]
    NotFound(i64),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
