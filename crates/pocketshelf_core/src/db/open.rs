//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::{apply_migrations, Schema};
use super::{DbError, DbResult, MigrationPolicy};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies all pending migrations of `schema`.
///
/// # Errors
/// - `StoreUnavailable` when the file cannot be opened.
/// - Migration errors from [`apply_migrations`].
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(
    path: impl AsRef<Path>,
    schema: &Schema,
    policy: MigrationPolicy,
) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", schema, policy, || {
        Connection::open(path).map_err(|err| DbError::StoreUnavailable {
            location: path.display().to_string(),
            reason: err.to_string(),
        })
    })
}

/// Opens an in-memory SQLite database and applies all migrations of `schema`.
pub fn open_db_in_memory(schema: &Schema) -> DbResult<Connection> {
    open_with("memory", schema, MigrationPolicy::Strict, || {
        Connection::open_in_memory().map_err(|err| DbError::StoreUnavailable {
            location: ":memory:".to_string(),
            reason: err.to_string(),
        })
    })
}

fn open_with(
    mode: &str,
    schema: &Schema,
    policy: MigrationPolicy,
    connect: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode={mode} schema={}",
        schema.name()
    );

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} schema={} duration_ms={} error_code=db_open_failed error={}",
                schema.name(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    match bootstrap_connection(&mut conn, schema, policy) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} schema={} duration_ms={}",
                schema.name(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} schema={} duration_ms={} error_code=db_bootstrap_failed error={}",
                schema.name(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(
    conn: &mut Connection,
    schema: &Schema,
    policy: MigrationPolicy,
) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn, schema, policy)?;
    Ok(())
}
