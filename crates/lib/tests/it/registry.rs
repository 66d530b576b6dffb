use std::sync::Arc;

use sortable::{
    Lists, Record,
    condition::{Clause, Condition},
    config::SortableConfig,
    registry::{ListDefinition, ListRegistry},
    store::InMemoryStore,
};

use crate::helpers::*;

#[test]
fn test_config_registers_every_list() {
    let registry = config().registry().unwrap();

    let names: Vec<&str> = registry.lists("todos").map(ListDefinition::name).collect();
    assert_eq!(names, ["", "client", "developer"]);

    let client = registry.resolve("todos", "client").unwrap();
    assert_eq!(client.order_column(), "client_priority");
    assert_eq!(client.scope_keys(), ["project_id"]);
    assert!(client.base_condition().is_empty());

    let default = registry.resolve("todos", "").unwrap();
    assert_eq!(default.order_column(), "position");
    assert_eq!(default.base_condition().clauses(), &[Clause::not_null("action")]);
}

#[test]
fn test_unknown_list() {
    let registry = config().registry().unwrap();
    let err = registry.resolve("todos", "invalid").unwrap_err();
    assert!(err.is_unknown_list());
    assert_eq!(err.list(), "invalid");
    assert_eq!(err.table(), "todos");

    // Lists are per table.
    assert!(registry.resolve("users", "client").is_err());
    assert!(registry.resolve("projects", "").is_err());
}

#[test]
fn test_duplicate_list_in_config() {
    let config = SortableConfig::from_json(
        r#"{"tables": [{"name": "todos", "lists": [{"name": "a"}, {"name": "a", "column": "b"}]}]}"#,
    )
    .unwrap();
    let err = config.registry().unwrap_err();
    assert!(err.is_duplicate_list());
    assert!(err.is_configuration_error());
}

#[test]
fn test_invalid_definitions() {
    let mut registry = ListRegistry::new();
    assert!(
        registry
            .register("todos", ListDefinition::new("").scope("project_id").scope("project_id"))
            .is_err()
    );
    assert!(
        registry
            .register("todos", ListDefinition::new("").column("position; DROP TABLE todos"))
            .is_err()
    );
    assert!(
        registry
            .register("todos", ListDefinition::new("").condition(Clause::not_null("a b")))
            .is_err()
    );
    // Nothing was registered by the failed attempts.
    assert_eq!(registry.lists("todos").count(), 0);
}

#[test]
fn test_scope_keys_drive_tracking() {
    let registry = Arc::new(config().registry().unwrap());
    assert!(registry.is_scope_key("todos", "project_id"));
    assert!(!registry.is_scope_key("todos", "action"));
    assert!(registry.is_scope_key("users", "topuser"));

    let lists = Lists::new(registry, Arc::new(InMemoryStore::new()));
    let mut todo = todo(&lists);
    lists.set(&mut todo, "action", "write tests");
    assert!(!todo.scope_changed());
    lists.set(&mut todo, "project_id", 1);
    assert!(todo.scope_changed());
}

#[test]
fn test_hash_conditions() {
    let mut registry = ListRegistry::new();
    registry
        .register(
            "users",
            ListDefinition::new("unnamed_steves")
                .column("steves_position")
                .conditions(Condition::from_pairs([
                    ("name", Some("steve")),
                    ("type", None),
                ])),
        )
        .unwrap();

    let definition = registry.resolve("users", "unnamed_steves").unwrap();
    assert_eq!(
        definition.base_condition().clauses(),
        &[Clause::equals("name", "steve"), Clause::is_null("type")]
    );

    let record = Record::new("users");
    let filter = definition.bind(&record);
    assert_eq!(filter.table(), "users");
    assert_eq!(filter.clauses().len(), 2);
}
