//! Core logic for the PocketShelf inventory and to-do apps.
//! Each app owns one SQLite store, one state holder and one headless screen.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod state;
pub mod view;

pub use config::{AppConfig, AppKind, ConfigError, DatabaseConfig};
pub use db::{Database, DbError, DbResult, MigrationPolicy};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{Item, ItemId, NewItem};
pub use model::todo::{NewTodo, TodoId, TodoItem};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::todo_repo::{SqliteTodoRepository, TodoRepository};
pub use repo::{RepoError, RepoResult};
pub use state::inventory_state::{InventoryUiState, InventoryViewModel};
pub use state::todo_state::{TodoUiState, TodoViewModel};
pub use view::inventory_screen::{FormError, InventoryScreen, ItemForm, ItemRow, ScreenError};
pub use view::todo_screen::{TodoRow, TodoScreen};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
