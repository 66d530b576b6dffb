//! The list registry.
//!
//! A [`ListRegistry`] maps each table (record type) to its named lists. It is
//! built once, typically from a [`SortableConfig`](crate::config::SortableConfig),
//! and then shared read-only (behind an `Arc`) with the ordering engine.
//!
//! ```
//! use sortable::registry::{ListDefinition, ListRegistry};
//!
//! let mut registry = ListRegistry::new();
//! registry
//!     .register("todos", ListDefinition::new("").scope("project_id"))
//!     .unwrap();
//! registry
//!     .register("todos", ListDefinition::new("client").column("client_priority").scope("project_id"))
//!     .unwrap();
//!
//! assert!(registry.resolve("todos", "client").is_ok());
//! assert!(registry.resolve("todos", "developer").is_err());
//! assert!(registry.is_scope_key("todos", "project_id"));
//! ```

mod definition;
mod errors;

use std::collections::{BTreeMap, HashMap};

pub use definition::ListDefinition;
pub use errors::RegistryError;

use crate::{config::SortableConfig, record::ScopeTracker};

/// Per-table list definitions.
#[derive(Debug, Clone, Default)]
pub struct ListRegistry {
    tables: HashMap<String, BTreeMap<String, ListDefinition>>,
}

impl ListRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every list in a configuration document.
    pub fn from_config(config: &SortableConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for table in &config.tables {
            for definition in &table.lists {
                registry.register(&table.name, definition.clone())?;
            }
        }
        Ok(registry)
    }

    /// Register `definition` on `table`.
    ///
    /// Fails with `DuplicateList` if the name is taken on that table and with
    /// `InvalidDefinition` if the definition breaks an invariant.
    pub fn register(
        &mut self,
        table: impl Into<String>,
        definition: ListDefinition,
    ) -> Result<(), RegistryError> {
        let table = table.into();
        definition.validate(&table)?;

        let lists = self.tables.entry(table.clone()).or_default();
        if lists.contains_key(definition.name()) {
            return Err(RegistryError::DuplicateList {
                table,
                list: definition.name().to_string(),
            });
        }

        tracing::debug!(
            table = %table,
            list = definition.name(),
            column = definition.order_column(),
            scope = ?definition.scope_keys(),
            "Registered sortable list"
        );
        lists.insert(definition.name().to_string(), definition);
        Ok(())
    }

    /// Look up the list `name` on `table`. `""` is the default list.
    pub fn resolve(&self, table: &str, name: &str) -> Result<&ListDefinition, RegistryError> {
        self.tables
            .get(table)
            .and_then(|lists| lists.get(name))
            .ok_or_else(|| RegistryError::UnknownList {
                table: table.to_string(),
                list: name.to_string(),
            })
    }

    /// All lists on `table`, ordered by name.
    pub fn lists(&self, table: &str) -> impl Iterator<Item = &ListDefinition> {
        self.tables
            .get(table)
            .into_iter()
            .flat_map(|lists| lists.values())
    }

    /// Tables with at least one registered list.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Whether any list on `table` is scoped by `field`.
    pub fn is_scope_key(&self, table: &str, field: &str) -> bool {
        self.lists(table).any(|list| list.is_scoped_by(field))
    }
}

impl ScopeTracker for ListRegistry {
    fn tracks_scope(&self, table: &str, field: &str) -> bool {
        self.is_scope_key(table, field)
    }
}
