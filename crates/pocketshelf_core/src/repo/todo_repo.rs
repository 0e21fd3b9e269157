//! To-do repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `todo_items` table.
//! - Offer a single-column completion update so toggles never rewrite text.
//!
//! # Invariants
//! - `list_todos` returns rows in insertion order (`id ASC`).
//! - Read paths reject invalid persisted state instead of masking it.

use super::{RepoError, RepoResult};
use crate::model::todo::{NewTodo, TodoId, TodoItem};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TODO_SELECT_SQL: &str = "SELECT id, text, is_completed FROM todo_items";

/// Repository interface for to-do rows.
pub trait TodoRepository {
    fn list_todos(&self) -> RepoResult<Vec<TodoItem>>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<TodoItem>>;
    fn insert_todo(&self, todo: &NewTodo) -> RepoResult<TodoItem>;
    fn update_todo(&self, todo: &TodoItem) -> RepoResult<TodoItem>;
    fn set_completed(&self, id: TodoId, is_completed: bool) -> RepoResult<TodoItem>;
    fn delete_todo(&self, id: TodoId) -> RepoResult<bool>;
}

/// SQLite-backed to-do repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn list_todos(&self) -> RepoResult<Vec<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn insert_todo(&self, todo: &NewTodo) -> RepoResult<TodoItem> {
        self.conn.execute(
            "INSERT INTO todo_items (text, is_completed) VALUES (?1, ?2);",
            params![todo.text.as_str(), bool_to_int(todo.is_completed)],
        )?;

        Ok(todo.clone().into_item(self.conn.last_insert_rowid()))
    }

    fn update_todo(&self, todo: &TodoItem) -> RepoResult<TodoItem> {
        let changed = self.conn.execute(
            "UPDATE todo_items SET text = ?1, is_completed = ?2 WHERE id = ?3;",
            params![
                todo.text.as_str(),
                bool_to_int(todo.is_completed),
                todo.id
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(todo.id));
        }

        Ok(todo.clone())
    }

    fn set_completed(&self, id: TodoId, is_completed: bool) -> RepoResult<TodoItem> {
        let updated = self
            .conn
            .query_row(
                "UPDATE todo_items SET is_completed = ?1 WHERE id = ?2
                 RETURNING id, text, is_completed;",
                params![bool_to_int(is_completed), id],
                |row| Ok(parse_todo_row(row)),
            )
            .optional()?;

        match updated {
            Some(todo) => todo,
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM todo_items WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<TodoItem> {
    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_completed value `{other}` in todo_items.is_completed"
            )));
        }
    };

    Ok(TodoItem {
        id: row.get("id")?,
        text: row.get("text")?,
        is_completed,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
