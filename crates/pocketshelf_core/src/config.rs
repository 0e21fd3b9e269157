//! Application configuration.
//!
//! # Responsibility
//! - Describe where each store lives and how it reacts to schema drift.
//! - Parse and validate JSON configuration documents.
//!
//! # Invariants
//! - Database file names are bare names, never paths.
//! - Defaults match the shipped apps: `todo_database` (strict) and
//!   `item_database` (destructive fallback).

use crate::db::{
    Database, DbError, DbResult, MigrationPolicy, Schema, INVENTORY_SCHEMA, TODO_SCHEMA,
};
use crate::logging::normalize_level;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The two independent apps sharing this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    Todo,
    Inventory,
}

impl AppKind {
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Todo => &TODO_SCHEMA,
            Self::Inventory => &INVENTORY_SCHEMA,
        }
    }
}

/// Per-store settings.
///
/// Deserialized through [`DatabaseSection`] so that omitted fields take the
/// owning app's defaults rather than a shared one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub file_name: String,
    pub migration_policy: MigrationPolicy,
}

/// Raw store section; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseSection {
    file_name: Option<String>,
    migration_policy: Option<MigrationPolicy>,
}

impl DatabaseSection {
    fn or_defaults(self, defaults: DatabaseConfig) -> DatabaseConfig {
        DatabaseConfig {
            file_name: self.file_name.unwrap_or(defaults.file_name),
            migration_policy: self.migration_policy.unwrap_or(defaults.migration_policy),
        }
    }
}

fn todo_section<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DatabaseConfig, D::Error> {
    Ok(DatabaseSection::deserialize(deserializer)?.or_defaults(DatabaseConfig::todo()))
}

fn inventory_section<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DatabaseConfig, D::Error> {
    Ok(DatabaseSection::deserialize(deserializer)?.or_defaults(DatabaseConfig::inventory()))
}

impl DatabaseConfig {
    pub fn todo() -> Self {
        Self {
            file_name: "todo_database".to_string(),
            migration_policy: MigrationPolicy::Strict,
        }
    }

    pub fn inventory() -> Self {
        Self {
            file_name: "item_database".to_string(),
            migration_policy: MigrationPolicy::DestructiveFallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding both database files.
    pub data_dir: PathBuf,
    /// Log level for `init_logging`; `None` uses the build default.
    pub log_level: Option<String>,
    #[serde(deserialize_with = "todo_section")]
    pub todo: DatabaseConfig,
    #[serde(deserialize_with = "inventory_section")]
    pub inventory: DatabaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: None,
            todo: DatabaseConfig::todo(),
            inventory: DatabaseConfig::inventory(),
        }
    }

    /// Parses a JSON document; missing keys fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (app, db) in [("todo", &self.todo), ("inventory", &self.inventory)] {
            validate_file_name(app, &db.file_name)?;
        }
        if self.todo.file_name == self.inventory.file_name {
            return Err(ConfigError::Invalid(format!(
                "todo and inventory must use different database files, both use `{}`",
                self.todo.file_name
            )));
        }
        if let Some(level) = &self.log_level {
            normalize_level(level).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        Ok(())
    }

    pub fn database(&self, app: AppKind) -> &DatabaseConfig {
        match app {
            AppKind::Todo => &self.todo,
            AppKind::Inventory => &self.inventory,
        }
    }

    pub fn database_path(&self, app: AppKind) -> PathBuf {
        self.data_dir.join(&self.database(app).file_name)
    }

    /// Opens the store for `app`, creating `data_dir` when missing.
    ///
    /// # Errors
    /// - `StoreUnavailable` when the directory or file cannot be created/opened.
    pub fn open_database(&self, app: AppKind) -> DbResult<Database> {
        std::fs::create_dir_all(&self.data_dir).map_err(|err| DbError::StoreUnavailable {
            location: self.data_dir.display().to_string(),
            reason: err.to_string(),
        })?;
        Database::open(
            self.database_path(app),
            app.schema(),
            self.database(app).migration_policy,
        )
    }
}

fn validate_file_name(app: &str, file_name: &str) -> Result<(), ConfigError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "{app}.file_name cannot be empty"
        )));
    }
    let is_bare = Path::new(trimmed)
        .file_name()
        .is_some_and(|name| name == trimmed);
    if !is_bare || trimmed != file_name {
        return Err(ConfigError::Invalid(format!(
            "{app}.file_name must be a bare file name, got `{file_name}`"
        )));
    }
    Ok(())
}
