use std::sync::Arc;

use sortable::{
    Record,
    condition::{Clause, ResolvedFilter},
    store::{InMemoryStore, RecordStore},
};

use crate::helpers::*;

#[test]
fn test_lists_survive_a_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sortable.json");

    let store = Arc::new(InMemoryStore::new());
    let lists = setup_with_store(store.clone());
    let todo_1 = todo(&lists);
    let mut todo_2 = todo(&lists);
    lists.move_up(&mut todo_2, "client").unwrap();
    store.save_to_file(&path).unwrap();

    let loaded = Arc::new(InMemoryStore::load_from_file(&path).unwrap());
    assert_eq!(loaded.row_count("todos").unwrap(), 2);
    let lists = setup_with_store(loaded);

    assert_eq!(stored_position(&lists, &todo_1, "client_priority"), Some(2));
    assert_eq!(stored_position(&lists, &todo_2, "client_priority"), Some(1));

    // The id sequence carries over, so new rows do not collide.
    let todo_3 = todo(&lists);
    assert!(todo_3.id() > todo_2.id());
    assert_eq!(todo_3.get_int("client_priority"), Some(3));
    assert_dense(&lists, &todo_3, "developer");
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = InMemoryStore::load_from_file(dir.path().join("absent.json")).unwrap();
    assert_eq!(store.row_count("todos").unwrap(), 0);
}

#[test]
fn test_load_corrupt_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sortable.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = InMemoryStore::load_from_file(&path).unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_rollback_restores_rows() {
    let store = InMemoryStore::new();
    let id = store
        .insert(&Record::new("todos").with("position", 1))
        .unwrap();

    store.begin().unwrap();
    store.begin().unwrap();
    let filter = ResolvedFilter::new("todos", vec![Clause::not_null("position")]);
    assert_eq!(store.update_all_where(&filter, "position", 4).unwrap(), 1);
    store.commit().unwrap();
    store.rollback().unwrap();

    assert_eq!(store.fetch("todos", id).unwrap().get_int("position"), Some(1));
    // Nothing left open.
    assert!(store.commit().is_err());
}

#[test]
fn test_unknown_table_reads_are_empty() {
    let store = InMemoryStore::new();
    let filter = ResolvedFilter::new("projects", Vec::new());
    assert_eq!(store.max_where(&filter, "position").unwrap(), None);
    assert!(store.find_all_where(&filter, "position").unwrap().is_empty());
    assert!(store.fetch("projects", 1).unwrap_err().is_not_found());
}
