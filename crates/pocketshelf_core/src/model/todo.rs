//! To-do list record.
//!
//! # Invariants
//! - `id` is generated by the store and never reused after deletion.
//! - `text` is stored as given; blank-text rejection belongs to the view layer.

use serde::{Deserialize, Serialize};

/// Store-generated identifier of a to-do row.
pub type TodoId = i64;

/// One row of the `todo_items` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub is_completed: bool,
}

impl TodoItem {
    /// Returns a copy with the completion flag replaced.
    pub fn with_completed(&self, is_completed: bool) -> Self {
        Self {
            is_completed,
            ..self.clone()
        }
    }
}

/// Insert payload for a to-do row; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub text: String,
    pub is_completed: bool,
}

impl NewTodo {
    /// Creates an open (not completed) to-do draft.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_completed: false,
        }
    }

    /// Attaches the store-generated id, producing the persisted shape.
    pub fn into_item(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            text: self.text,
            is_completed: self.is_completed,
        }
    }
}
