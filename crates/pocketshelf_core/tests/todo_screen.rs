use pocketshelf_core::db::migrations::TODO_SCHEMA;
use pocketshelf_core::{
    Database, NewTodo, RepoError, SqliteTodoRepository, TodoItem, TodoRepository, TodoRow,
    TodoScreen, TodoViewModel,
};
use std::sync::Arc;

fn view_model() -> (Database, Arc<TodoViewModel>) {
    let db = Database::open_in_memory(&TODO_SCHEMA).unwrap();
    let view_model = Arc::new(TodoViewModel::new(db.clone()));
    (db, view_model)
}

fn todo(id: i64, text: &str, is_completed: bool) -> TodoItem {
    TodoItem {
        id,
        text: text.to_string(),
        is_completed,
    }
}

#[tokio::test]
async fn add_toggle_delete_scenario() {
    let (_db, view_model) = view_model();
    view_model.initialize().await.unwrap();
    assert!(view_model.snapshot().todos.is_empty());

    view_model.add("buy milk").await.unwrap();
    assert_eq!(view_model.snapshot().todos, [todo(1, "buy milk", false)]);

    view_model.toggle(1).await.unwrap();
    assert_eq!(view_model.snapshot().todos, [todo(1, "buy milk", true)]);

    assert!(view_model.delete(1).await.unwrap());
    assert!(view_model.snapshot().todos.is_empty());
}

#[tokio::test]
async fn initialize_loads_existing_rows_once() {
    let (db, view_model) = view_model();
    db.with_conn(|conn| SqliteTodoRepository::new(conn).insert_todo(&NewTodo::new("seeded")))
        .unwrap();

    view_model.initialize().await.unwrap();
    assert_eq!(view_model.snapshot().todos, [todo(1, "seeded", false)]);

    db.with_conn(|conn| SqliteTodoRepository::new(conn).insert_todo(&NewTodo::new("later")))
        .unwrap();
    view_model.initialize().await.unwrap();
    assert_eq!(view_model.snapshot().todos.len(), 1);

    view_model.reload().await.unwrap();
    assert_eq!(view_model.snapshot().todos.len(), 2);
}

#[tokio::test]
async fn add_grows_snapshot_by_exactly_one() {
    let (_db, view_model) = view_model();
    view_model.initialize().await.unwrap();
    view_model.add("first").await.unwrap();
    let before = view_model.snapshot().todos.len();

    let created = view_model.add("second").await.unwrap();

    let after = view_model.snapshot().todos;
    assert_eq!(after.len(), before + 1);
    assert_eq!(after.last(), Some(&created));
    assert_eq!(created.text, "second");
    assert!(!created.is_completed);
}

#[tokio::test]
async fn toggling_twice_restores_the_flag() {
    let (_db, view_model) = view_model();
    let created = view_model.add("stretch").await.unwrap();

    view_model.toggle(created.id).await.unwrap();
    view_model.reload().await.unwrap();
    view_model.toggle(created.id).await.unwrap();
    view_model.reload().await.unwrap();

    assert_eq!(view_model.snapshot().todos, [created]);
}

#[tokio::test]
async fn toggle_and_delete_skip_ids_missing_from_snapshot() {
    let (db, view_model) = view_model();
    view_model.add("one").await.unwrap();
    view_model.add("two").await.unwrap();
    let before = view_model.snapshot();

    assert_eq!(view_model.toggle(99).await.unwrap(), None);
    assert!(!view_model.delete(99).await.unwrap());
    assert_eq!(view_model.snapshot(), before);

    let err = db
        .with_conn(|conn| SqliteTodoRepository::new(conn).set_completed(99, true))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[tokio::test]
async fn delete_removes_exactly_one_row() {
    let (_db, view_model) = view_model();
    let keep = view_model.add("keep").await.unwrap();
    let removed = view_model.add("drop").await.unwrap();

    assert!(view_model.delete(removed.id).await.unwrap());

    let todos = view_model.snapshot().todos;
    assert_eq!(todos, [keep]);
    assert!(todos.iter().all(|todo| todo.id != removed.id));
}

#[tokio::test]
async fn toggle_does_not_overwrite_text_changed_elsewhere() {
    let (db, view_model) = view_model();
    let created = view_model.add("old text").await.unwrap();

    db.with_conn(|conn| {
        SqliteTodoRepository::new(conn).update_todo(&TodoItem {
            text: "new text".to_string(),
            ..created.clone()
        })
    })
    .unwrap();

    let toggled = view_model.toggle(created.id).await.unwrap().unwrap();
    assert_eq!(toggled, todo(created.id, "new text", true));
    assert_eq!(view_model.snapshot().todos, [toggled]);
}

#[tokio::test]
async fn screen_rejects_blank_input() {
    let (_db, view_model) = view_model();
    let mut screen = TodoScreen::new(view_model.clone());

    for blank in ["", "   ", "\t\n"] {
        screen.set_input(blank);
        assert_eq!(screen.submit().await.unwrap(), None);
        assert_eq!(screen.input(), blank);
    }
    assert!(view_model.snapshot().todos.is_empty());
    assert!(screen.rows().is_empty());
}

#[tokio::test]
async fn screen_submits_clears_input_and_renders_rows() {
    let (_db, view_model) = view_model();
    let mut screen = TodoScreen::new(view_model.clone());

    screen.set_input("buy milk");
    let created = screen.submit().await.unwrap().unwrap();
    assert_eq!(screen.input(), "");
    screen.changed().await;

    screen.toggle(created.id).await.unwrap();
    screen.set_input("call mom");
    screen.submit().await.unwrap();

    assert_eq!(
        screen.rows(),
        [
            TodoRow {
                id: 1,
                text: "buy milk".to_string(),
                checked: true,
            },
            TodoRow {
                id: 2,
                text: "call mom".to_string(),
                checked: false,
            },
        ]
    );
    assert_eq!(
        screen.render(),
        "TODO APP\n[x] buy milk (#1)\n[ ] call mom (#2)\n"
    );

    assert!(screen.delete(created.id).await.unwrap());
    assert_eq!(screen.rows().len(), 1);
}

#[tokio::test]
async fn subscribers_observe_each_published_snapshot() {
    let (_db, view_model) = view_model();
    let mut receiver = view_model.subscribe();

    view_model.add("observed").await.unwrap();
    receiver.changed().await.unwrap();
    assert_eq!(receiver.borrow_and_update().todos.len(), 1);

    view_model.delete(1).await.unwrap();
    receiver.changed().await.unwrap();
    assert!(receiver.borrow_and_update().todos.is_empty());
}
