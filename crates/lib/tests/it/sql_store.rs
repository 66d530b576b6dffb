use std::sync::Arc;
use std::time::Duration;

use sortable::{
    Error, Record, Value,
    condition::{Clause, ResolvedFilter},
    store::{ColumnKind, DbKind, RecordStore, SqlxStore, StoreError, TableSchema},
};

use crate::helpers::*;

fn store_with_todos() -> SqlxStore {
    let store = SqlxStore::in_memory().unwrap();
    store
        .register_table(
            TableSchema::new("todos")
                .column("project_id", ColumnKind::Integer)
                .column("action", ColumnKind::Text)
                .column("done", ColumnKind::Boolean)
                .column("position", ColumnKind::Integer),
        )
        .unwrap();
    store
}

#[test]
fn test_list_scenarios_on_sqlite() {
    let lists = setup_with_store(sqlite_store());
    let todo_1 = todo_in(&lists, 1);
    let mut todo_2 = todo_in(&lists, 1);
    let mut todo_3 = todo_in(&lists, 1);
    assert_eq!(todo_3.get_int("client_priority"), Some(3));

    assert!(lists.move_to_top(&mut todo_3, "client").unwrap());
    assert_eq!(
        ids_in_order(&lists, &todo_1, "client"),
        vec![todo_3.id().unwrap(), todo_1.id().unwrap(), todo_2.id().unwrap()]
    );

    lists.set(&mut todo_2, "project_id", 2);
    lists.save(&mut todo_2).unwrap();
    assert_eq!(todo_2.get_int("client_priority"), Some(1));
    assert_dense(&lists, &todo_1, "client");

    lists.destroy(&mut todo_3).unwrap();
    assert_eq!(stored_position(&lists, &todo_1, "client_priority"), Some(1));
    assert_eq!(stored_position(&lists, &todo_1, "developer_priority"), Some(1));
}

#[test]
fn test_boolean_scope_on_sqlite() {
    let lists = setup_with_store(sqlite_store());
    let user_1 = create(&lists, Record::new("users").with("topuser", false));
    let mut user_2 = create(&lists, Record::new("users").with("topuser", false));

    lists.set(&mut user_2, "topuser", true);
    lists.save(&mut user_2).unwrap();

    let stored = reloaded(&lists, &user_2);
    assert_eq!(stored.get("topuser"), &Value::Bool(true));
    assert_eq!(stored.get_int("topuser_position"), Some(1));
    assert_eq!(stored_position(&lists, &user_1, "topuser_position"), Some(1));
}

#[test]
fn test_round_trips_values() {
    let store = store_with_todos();
    assert_eq!(store.kind(), DbKind::Sqlite);

    let record = Record::new("todos")
        .with("action", "write it")
        .with("done", true)
        .with("position", 7);
    let id = store.insert(&record).unwrap();

    let loaded = store.fetch("todos", id).unwrap();
    assert_eq!(loaded.get("action"), &Value::from("write it"));
    assert_eq!(loaded.get("done"), &Value::Bool(true));
    assert_eq!(loaded.get_int("position"), Some(7));
    assert_eq!(loaded.get("project_id"), &Value::Null);
}

#[test]
fn test_empty_insert_uses_defaults() {
    let store = store_with_todos();
    let first = store.insert(&Record::new("todos")).unwrap();
    let second = store.insert(&Record::new("todos")).unwrap();
    assert!(second > first);
}

#[test]
fn test_schema_errors() {
    let store = store_with_todos();

    let err = store.insert(&Record::new("projects")).unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::UnknownTable { .. })));
    assert!(store.schema("projects").is_err());

    let err = store
        .insert(&Record::new("todos").with("priority", 1))
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::UnknownColumn { .. })));

    let err = store
        .insert(&Record::new("todos").with("position", "first"))
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::TypeMismatch { .. })));

    let filter = ResolvedFilter::new("todos", vec![Clause::is_null("priority")]);
    assert!(store.max_where(&filter, "position").is_err());
}

#[test]
fn test_update_and_delete_missing_rows() {
    let store = store_with_todos();
    let id = store.insert(&Record::new("todos")).unwrap();
    let record = store.fetch("todos", id).unwrap();
    store.delete(&record).unwrap();

    assert!(store.fetch("todos", id).unwrap_err().is_not_found());
    assert!(store.delete(&record).unwrap_err().is_not_found());
    assert!(store.update(&record).unwrap_err().is_not_found());
}

#[test]
fn test_bulk_shift_skips_nulls() {
    let store = store_with_todos();
    for position in [Some(1), None, Some(2)] {
        let record = match position {
            Some(position) => Record::new("todos").with("position", position),
            None => Record::new("todos"),
        };
        store.insert(&record).unwrap();
    }

    let filter = ResolvedFilter::new("todos", Vec::new());
    assert_eq!(store.update_all_where(&filter, "position", 10).unwrap(), 2);
    assert_eq!(store.max_where(&filter, "position").unwrap(), Some(12));

    let ordered: Vec<Option<i64>> = store
        .find_all_where(&filter, "position")
        .unwrap()
        .iter()
        .map(|record| record.get_int("position"))
        .collect();
    assert_eq!(ordered, [None, Some(11), Some(12)]);
}

#[test]
fn test_rollback_discards_changes() {
    let store = store_with_todos();
    let id = store
        .insert(&Record::new("todos").with("position", 1))
        .unwrap();

    store.begin().unwrap();
    store.begin().unwrap();
    let filter = ResolvedFilter::new("todos", Vec::new());
    store.update_all_where(&filter, "position", 1).unwrap();
    store.commit().unwrap();
    // Reads inside the transaction see its writes.
    assert_eq!(store.fetch("todos", id).unwrap().get_int("position"), Some(2));
    store.rollback().unwrap();

    assert_eq!(store.fetch("todos", id).unwrap().get_int("position"), Some(1));
    assert!(store.rollback().is_ok());
}

#[test]
fn test_transaction_belongs_to_its_thread() {
    let store = Arc::new(store_with_todos());
    store.begin().unwrap();
    store
        .insert(&Record::new("todos").with("project_id", 1))
        .unwrap();

    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            store.begin().unwrap();
            store
                .insert(&Record::new("todos").with("project_id", 2))
                .unwrap();
            store.commit().unwrap();
        })
    };
    std::thread::sleep(Duration::from_millis(50));
    assert!(!writer.is_finished());

    store.rollback().unwrap();
    writer.join().unwrap();

    let projects: Vec<Option<i64>> = store
        .find_all_where(&ResolvedFilter::new("todos", Vec::new()), "position")
        .unwrap()
        .iter()
        .map(|record| record.get_int("project_id"))
        .collect();
    assert_eq!(projects, [Some(2)]);
}

#[test]
fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sortable.db");

    let (todo_1, todo_2) = {
        let store: Arc<dyn RecordStore> = {
            let store = SqlxStore::open_sqlite(&path).unwrap();
            for schema in config().schemas() {
                store.register_table(schema).unwrap();
            }
            Arc::new(store)
        };
        let lists = setup_with_store(store);
        let todo_1 = todo(&lists);
        let mut todo_2 = todo(&lists);
        lists.move_up(&mut todo_2, "developer").unwrap();
        (todo_1, todo_2)
    };

    let store = SqlxStore::open_sqlite(&path).unwrap();
    for schema in config().schemas() {
        store.register_table(schema).unwrap();
    }
    let lists = setup_with_store(Arc::new(store));
    assert_eq!(stored_position(&lists, &todo_1, "developer_priority"), Some(2));
    assert_eq!(stored_position(&lists, &todo_2, "developer_priority"), Some(1));
}
