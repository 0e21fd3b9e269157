use pocketshelf_core::db::migrations::TODO_SCHEMA;
use pocketshelf_core::db::open_db_in_memory;
use pocketshelf_core::{NewTodo, RepoError, SqliteTodoRepository, TodoItem, TodoRepository};

#[test]
fn insert_assigns_fresh_ids_and_defaults_flag() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);

    let first = repo.insert_todo(&NewTodo::new("buy milk")).unwrap();
    let second = repo.insert_todo(&NewTodo::new("walk dog")).unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(!first.is_completed);
    assert_eq!(repo.get_todo(first.id).unwrap(), Some(first));
}

#[test]
fn list_returns_insertion_order() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);

    for text in ["c", "a", "b"] {
        repo.insert_todo(&NewTodo::new(text)).unwrap();
    }

    let texts: Vec<_> = repo
        .list_todos()
        .unwrap()
        .into_iter()
        .map(|todo| todo.text)
        .collect();
    assert_eq!(texts, ["c", "a", "b"]);
}

#[test]
fn data_layer_accepts_blank_text() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);

    let blank = repo.insert_todo(&NewTodo::new("   ")).unwrap();
    assert_eq!(blank.text, "   ");
}

#[test]
fn update_replaces_whole_record() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);

    let created = repo.insert_todo(&NewTodo::new("draft")).unwrap();
    let replacement = TodoItem {
        id: created.id,
        text: "final".to_string(),
        is_completed: true,
    };
    repo.update_todo(&replacement).unwrap();

    assert_eq!(repo.get_todo(created.id).unwrap(), Some(replacement));
}

#[test]
fn update_on_missing_id_fails_and_leaves_store_unchanged() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    repo.insert_todo(&NewTodo::new("one")).unwrap();
    repo.insert_todo(&NewTodo::new("two")).unwrap();
    let before = repo.list_todos().unwrap();

    let ghost = NewTodo::new("ghost").into_item(99);
    let err = repo.update_todo(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));

    let err = repo.set_completed(99, true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));

    assert_eq!(repo.list_todos().unwrap(), before);
}

#[test]
fn set_completed_touches_only_the_flag() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    let created = repo.insert_todo(&NewTodo::new("buy milk")).unwrap();

    let done = repo.set_completed(created.id, true).unwrap();
    assert_eq!(done, created.with_completed(true));

    let reopened = repo.set_completed(created.id, false).unwrap();
    assert_eq!(reopened, created);
}

#[test]
fn delete_is_noop_when_absent() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);
    let created = repo.insert_todo(&NewTodo::new("once")).unwrap();

    assert!(repo.delete_todo(created.id).unwrap());
    assert!(!repo.delete_todo(created.id).unwrap());
    assert!(repo.get_todo(created.id).unwrap().is_none());
}

#[test]
fn deleted_ids_are_never_reused() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    let repo = SqliteTodoRepository::new(&conn);

    let first = repo.insert_todo(&NewTodo::new("first")).unwrap();
    repo.delete_todo(first.id).unwrap();
    let second = repo.insert_todo(&NewTodo::new("second")).unwrap();

    assert!(second.id > first.id);
}

#[test]
fn invalid_persisted_flag_is_rejected() {
    let conn = open_db_in_memory(&TODO_SCHEMA).unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO todo_items (text, is_completed) VALUES ('bad', 5);",
    )
    .unwrap();

    let err = SqliteTodoRepository::new(&conn).list_todos().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
