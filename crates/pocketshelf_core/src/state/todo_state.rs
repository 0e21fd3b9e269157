//! State holder for the to-do screen.

use crate::db::Database;
use crate::model::todo::{NewTodo, TodoId, TodoItem};
use crate::repo::todo_repo::{SqliteTodoRepository, TodoRepository};
use crate::repo::RepoResult;
use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Observable snapshot published to the to-do screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoUiState {
    /// Rows in insertion order.
    pub todos: Vec<TodoItem>,
}

impl TodoUiState {
    pub fn find(&self, id: TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id == id)
    }
}

/// Bridges the `todo_items` store to subscribers of [`TodoUiState`].
pub struct TodoViewModel {
    db: Database,
    state: watch::Sender<TodoUiState>,
    initialized: AtomicBool,
}

impl TodoViewModel {
    /// Creates a holder with an empty snapshot; call [`Self::initialize`] to load.
    pub fn new(db: Database) -> Self {
        let (state, _) = watch::channel(TodoUiState::default());
        Self {
            db,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<TodoUiState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current snapshot.
    pub fn snapshot(&self) -> TodoUiState {
        self.state.borrow().clone()
    }

    /// Loads the table once per holder; later calls are no-ops.
    ///
    /// A failed load leaves the holder uninitialized so it can be retried.
    pub async fn initialize(&self) -> RepoResult<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if let Err(err) = self.reload().await {
            self.initialized.store(false, Ordering::SeqCst);
            return Err(err);
        }
        Ok(())
    }

    /// Replaces the snapshot with a full read of the table.
    pub async fn reload(&self) -> RepoResult<()> {
        let todos = self
            .db
            .run(|conn| SqliteTodoRepository::new(conn).list_todos())
            .await
            .inspect_err(|err| {
                error!("event=todo_reload module=state status=error error={err}");
            })?;

        debug!(
            "event=todo_reload module=state status=ok count={}",
            todos.len()
        );
        self.state.send_replace(TodoUiState { todos });
        Ok(())
    }

    /// Inserts a new open to-do with `text` and appends it to the snapshot.
    ///
    /// No validation happens here; blank input is filtered by the screen.
    pub async fn add(&self, text: impl Into<String>) -> RepoResult<TodoItem> {
        let draft = NewTodo::new(text);
        let created = self
            .db
            .run(move |conn| SqliteTodoRepository::new(conn).insert_todo(&draft))
            .await?;

        debug!("event=todo_add module=state status=ok id={}", created.id);
        let row = created.clone();
        self.state.send_modify(|state| {
            state.todos.retain(|todo| todo.id != row.id);
            state.todos.push(row);
            state.todos.sort_by_key(|todo| todo.id);
        });
        Ok(created)
    }

    /// Flips the completion flag of the snapshot row with `id`.
    ///
    /// Returns `Ok(None)` without touching the store when `id` is not in the
    /// snapshot.
    pub async fn toggle(&self, id: TodoId) -> RepoResult<Option<TodoItem>> {
        let current = self.state.borrow().find(id).map(|todo| todo.is_completed);
        let Some(is_completed) = current else {
            debug!("event=todo_toggle module=state status=skipped id={id}");
            return Ok(None);
        };

        let updated = self
            .db
            .run(move |conn| SqliteTodoRepository::new(conn).set_completed(id, !is_completed))
            .await?;

        debug!(
            "event=todo_toggle module=state status=ok id={id} is_completed={}",
            updated.is_completed
        );
        let row = updated.clone();
        self.state.send_modify(|state| {
            if let Some(slot) = state.todos.iter_mut().find(|todo| todo.id == row.id) {
                *slot = row;
            }
        });
        Ok(Some(updated))
    }

    /// Deletes the snapshot row with `id`.
    ///
    /// Returns `Ok(false)` when `id` is not in the snapshot or was already
    /// gone from the store.
    pub async fn delete(&self, id: TodoId) -> RepoResult<bool> {
        if self.state.borrow().find(id).is_none() {
            debug!("event=todo_delete module=state status=skipped id={id}");
            return Ok(false);
        }

        let removed = self
            .db
            .run(move |conn| SqliteTodoRepository::new(conn).delete_todo(id))
            .await?;

        debug!("event=todo_delete module=state status=ok id={id} removed={removed}");
        self.state
            .send_modify(|state| state.todos.retain(|todo| todo.id != id));
        Ok(removed)
    }
}
