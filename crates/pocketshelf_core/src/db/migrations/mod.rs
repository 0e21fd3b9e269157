//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register each store's schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Rebuild a schema from scratch when the destructive fallback is allowed.
//!
//! # Invariants
//! - `version` values must remain monotonic within a schema.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult, MigrationPolicy};
use log::warn;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

/// Named set of tables owned by one store, plus its migrations.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    tables: &'static [&'static str],
    migrations: &'static [Migration],
}

pub static TODO_SCHEMA: Schema = Schema {
    name: "todo",
    tables: &["todo_items"],
    migrations: &[Migration {
        version: 1,
        sql: include_str!("todo_0001_init.sql"),
    }],
};

pub static INVENTORY_SCHEMA: Schema = Schema {
    name: "inventory",
    tables: &["items"],
    migrations: &[Migration {
        version: 1,
        sql: include_str!("inventory_0001_init.sql"),
    }],
};

impl Schema {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Tables created (and dropped on destructive fallback) by this schema.
    pub fn tables(&self) -> &'static [&'static str] {
        self.tables
    }

    /// Returns the latest migration version known by this binary.
    pub fn latest_version(&self) -> u32 {
        self.migrations
            .last()
            .map_or(0, |migration| migration.version)
    }
}

/// Applies all pending migrations of `schema` on the provided connection.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this build and
///   `policy` is [`MigrationPolicy::Strict`].
pub fn apply_migrations(
    conn: &mut Connection,
    schema: &Schema,
    policy: MigrationPolicy,
) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = schema.latest_version();

    if current_version > latest {
        return match policy {
            MigrationPolicy::Strict => Err(DbError::UnsupportedSchemaVersion {
                schema: schema.name,
                db_version: current_version,
                latest_supported: latest,
            }),
            MigrationPolicy::DestructiveFallback => {
                warn!(
                    "event=db_migrate module=db status=destructive schema={} db_version={} latest={}",
                    schema.name, current_version, latest
                );
                recreate_schema(conn, schema)
            }
        };
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in schema.migrations {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn recreate_schema(conn: &mut Connection, schema: &Schema) -> DbResult<()> {
    let tx = conn.transaction()?;
    for table in schema.tables {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{table}\";"))?;
    }
    for migration in schema.migrations {
        tx.execute_batch(migration.sql)?;
    }
    tx.execute_batch(&format!(
        "PRAGMA user_version = {};",
        schema.latest_version()
    ))?;
    tx.commit()?;
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
