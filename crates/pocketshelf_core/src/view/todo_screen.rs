//! To-do screen: an input line, a save action and a checkable list.

use crate::model::todo::{TodoId, TodoItem};
use crate::repo::RepoResult;
use crate::state::todo_state::{TodoUiState, TodoViewModel};
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::watch;

const TITLE: &str = "TODO APP";

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub text: String,
    pub checked: bool,
}

pub struct TodoScreen {
    view_model: Arc<TodoViewModel>,
    snapshot: watch::Receiver<TodoUiState>,
    input: String,
}

impl TodoScreen {
    pub fn new(view_model: Arc<TodoViewModel>) -> Self {
        let snapshot = view_model.subscribe();
        Self {
            view_model,
            snapshot,
            input: String::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Saves the input as a new to-do and clears it.
    ///
    /// Blank or whitespace-only input is ignored: nothing is stored and the
    /// buffer is left as typed.
    pub async fn submit(&mut self) -> RepoResult<Option<TodoItem>> {
        if self.input.trim().is_empty() {
            return Ok(None);
        }

        let created = self.view_model.add(self.input.clone()).await?;
        self.input.clear();
        Ok(Some(created))
    }

    pub async fn toggle(&self, id: TodoId) -> RepoResult<Option<TodoItem>> {
        self.view_model.toggle(id).await
    }

    pub async fn delete(&self, id: TodoId) -> RepoResult<bool> {
        self.view_model.delete(id).await
    }

    /// Waits for the next published snapshot.
    pub async fn changed(&mut self) {
        // The screen owns the view model, so the sender outlives this receiver.
        let _ = self.snapshot.changed().await;
    }

    pub fn rows(&self) -> Vec<TodoRow> {
        self.snapshot
            .borrow()
            .todos
            .iter()
            .map(|todo| TodoRow {
                id: todo.id,
                text: todo.text.clone(),
                checked: todo.is_completed,
            })
            .collect()
    }

    /// Renders the title followed by one `[x]`/`[ ]` line per row.
    pub fn render(&self) -> String {
        let mut out = String::from(TITLE);
        out.push('\n');
        for row in self.rows() {
            let mark = if row.checked { 'x' } else { ' ' };
            let _ = writeln!(out, "[{mark}] {} (#{})", row.text, row.id);
        }
        out
    }
}
