use sortable::Record;

use crate::helpers::*;

#[test]
fn test_base_condition_limits_the_count() {
    let lists = setup();
    let todo_1 = todo(&lists);
    let todo_2 = todo_with_action(&lists, "test");
    let todo_3 = todo(&lists);
    let todo_4 = todo_with_action(&lists, "test again");
    let todo_5 = todo(&lists);
    let todo_6 = todo(&lists);

    // Records outside the condition still get one past the last matching item.
    let positions: Vec<Option<i64>> = [&todo_1, &todo_2, &todo_3, &todo_4, &todo_5, &todo_6]
        .iter()
        .map(|todo| todo.get_int("position"))
        .collect();
    assert_eq!(
        positions,
        [Some(1), Some(1), Some(2), Some(2), Some(3), Some(3)]
    );

    // Only matching records are items of the list.
    assert_eq!(
        ids_in_order(&lists, &todo_2, ""),
        vec![todo_2.id().unwrap(), todo_4.id().unwrap()]
    );
}

#[test]
fn test_subclasses_share_an_unscoped_type() {
    let lists = setup();
    let todo_1 = todo_with_action(&lists, "test");
    let child = create(
        &lists,
        Record::new("todos").with("type", "TodoChild").with("action", "test"),
    );
    let todo_3 = todo_with_action(&lists, "test");

    assert_eq!(todo_1.get_int("position"), Some(1));
    assert_eq!(child.get_int("position"), Some(2));
    assert_eq!(todo_3.get_int("position"), Some(3));
}

#[test]
fn test_type_scope_separates_subclasses() {
    let lists = setup();
    let user_1 = user(&lists, "User");
    let admin_1 = user(&lists, "Admin");
    let user_2 = user(&lists, "User");
    let admin_2 = user(&lists, "Admin");

    assert_eq!(user_1.get_int("position"), Some(1));
    assert_eq!(user_2.get_int("position"), Some(2));
    assert_eq!(admin_1.get_int("position"), Some(1));
    assert_eq!(admin_2.get_int("position"), Some(2));
}

#[test]
fn test_equality_conditions() {
    let lists = setup();
    let steve = create(&lists, Record::new("users").with("name", "steve"));
    let bob = create(&lists, Record::new("users").with("name", "bob"));
    let steve_2 = create(&lists, Record::new("users").with("name", "steve"));

    assert_eq!(steve.get_int("steves_position"), Some(1));
    assert_eq!(bob.get_int("steves_position"), Some(2));
    assert_eq!(steve_2.get_int("steves_position"), Some(2));

    let last = lists.last_item(&bob, "steves").unwrap().unwrap();
    assert!(last.same_row(&steve_2));
}
