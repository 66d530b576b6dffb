use sortable::Record;

use crate::helpers::*;

#[test]
fn test_first_item() {
    let lists = setup();
    let todo_1 = todo(&lists);
    let todo_2 = todo(&lists);

    for list in ["client", "developer"] {
        let first = lists.first_item(&todo_2, list).unwrap().unwrap();
        assert!(first.same_row(&todo_1));
    }
    assert!(lists.is_first_item(&todo_1, "client").unwrap());
    assert!(!lists.is_first_item(&todo_2, "client").unwrap());
}

#[test]
fn test_last_item() {
    let lists = setup();
    let todo_1 = todo(&lists);
    let todo_2 = todo(&lists);

    for list in ["client", "developer"] {
        let last = lists.last_item(&todo_1, list).unwrap().unwrap();
        assert!(last.same_row(&todo_2));
    }
    assert!(lists.is_last_item(&todo_2, "client").unwrap());
    assert!(!lists.is_last_item(&todo_1, "client").unwrap());
}

#[test]
fn test_last_position() {
    let lists = setup();
    assert_eq!(lists.last_position(&Record::new("todos"), "client").unwrap(), 0);

    let todo_1 = todo(&lists);
    assert_eq!(lists.last_position(&todo_1, "client").unwrap(), 1);
    todo(&lists);
    assert_eq!(lists.last_position(&todo_1, "client").unwrap(), 2);

    // Other projects are separate lists.
    let other = Record::new("todos").with("project_id", 9);
    assert_eq!(lists.last_position(&other, "client").unwrap(), 0);
}

#[test]
fn test_in_list() {
    let lists = setup();
    let mut todo = Record::new("todos");
    assert!(!lists.in_list(&todo, "client").unwrap());

    lists.save(&mut todo).unwrap();
    assert!(lists.in_list(&todo, "client").unwrap());

    assert!(lists.remove_from_list_and_save(&mut todo, "client").unwrap());
    assert!(!lists.in_list(&todo, "client").unwrap());
    // Still in the developer list.
    assert!(lists.in_list(&todo, "developer").unwrap());
}

#[test]
fn test_next_and_previous_item() {
    let lists = setup();
    let todo_1 = todo(&lists);
    let todo_2 = todo(&lists);

    let next = lists.next_item(&todo_1, "client").unwrap().unwrap();
    assert!(next.same_row(&todo_2));
    assert!(lists.next_item(&todo_2, "client").unwrap().is_none());

    let previous = lists.previous_item(&todo_2, "client").unwrap().unwrap();
    assert!(previous.same_row(&todo_1));
    assert!(lists.previous_item(&todo_1, "client").unwrap().is_none());
}

#[test]
fn test_item_at_offset_skips_other_scopes() {
    let lists = setup();
    let todo_1 = todo(&lists);
    let _todo_2 = todo_in(&lists, 1);
    let todo_3 = todo(&lists);

    let previous = lists.item_at_offset(&todo_3, -1, "client").unwrap().unwrap();
    assert!(previous.same_row(&todo_1));
    let next = lists.item_at_offset(&todo_1, 1, "client").unwrap().unwrap();
    assert!(next.same_row(&todo_3));
}

#[test]
fn test_item_at_offset_out_of_range() {
    let lists = setup();
    let todo_1 = todo(&lists);
    todo(&lists);

    assert!(lists.item_at_offset(&todo_1, -1, "client").unwrap().is_none());
    assert!(lists.item_at_offset(&todo_1, 2, "client").unwrap().is_none());
    // New records are in no list.
    let fresh = Record::new("todos");
    assert!(lists.item_at_offset(&fresh, 1, "client").unwrap().is_none());
    let claimed = Record::new("todos").with("client_priority", 1);
    assert!(lists.item_at_offset(&claimed, 1, "client").unwrap().is_none());
}

#[test]
fn test_item_at_offset_of_a_removed_item() {
    let lists = setup();
    let mut todo_1 = todo(&lists);
    let todo_2 = todo(&lists);
    lists.remove_from_list_and_save(&mut todo_1, "client").unwrap();

    assert!(lists.next_item(&todo_1, "client").unwrap().is_none());
    assert!(lists.previous_item(&todo_1, "client").unwrap().is_none());
    // Other lists still hold it.
    let next = lists.next_item(&todo_1, "developer").unwrap().unwrap();
    assert!(next.same_row(&todo_2));
}

#[test]
fn test_higher_and_lower_items() {
    let lists = setup();
    let user_1 = user(&lists, "User");
    let user_2 = user(&lists, "User");
    let user_3 = user(&lists, "User");

    let higher: Vec<Option<i64>> = lists
        .higher_items(&user_3, "")
        .unwrap()
        .iter()
        .map(Record::id)
        .collect();
    assert_eq!(higher, vec![user_1.id(), user_2.id()]);

    let lower: Vec<Option<i64>> = lists
        .lower_items(&user_1, "")
        .unwrap()
        .iter()
        .map(Record::id)
        .collect();
    assert_eq!(lower, vec![user_2.id(), user_3.id()]);

    assert!(lists.higher_items(&user_1, "").unwrap().is_empty());
    assert!(
        lists
            .lower_items(&Record::new("users").with("type", "User"), "")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_items_in_order() {
    let lists = setup();
    let mut todo_1 = todo(&lists);
    let todo_2 = todo(&lists);
    let todo_3 = todo(&lists);

    lists.move_to_bottom(&mut todo_1, "client").unwrap();
    assert_eq!(
        ids_in_order(&lists, &todo_1, "client"),
        vec![todo_2.id().unwrap(), todo_3.id().unwrap(), todo_1.id().unwrap()]
    );
    assert_dense(&lists, &todo_1, "client");
}

#[test]
fn test_unknown_list_on_queries() {
    let lists = setup();
    let todo = todo(&lists);
    assert!(lists.in_list(&todo, "invalid").unwrap_err().is_unknown_list());
    assert!(lists.last_item(&todo, "invalid").unwrap_err().is_unknown_list());
    assert!(lists.next_item(&todo, "invalid").unwrap_err().is_unknown_list());
    assert!(lists.higher_items(&todo, "invalid").unwrap_err().is_unknown_list());
}
