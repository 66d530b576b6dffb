//! The ordering engine.
//!
//! [`Lists`] keeps every registered list of a table densely ordered: within
//! one scope the order column of the records in the list is exactly
//! `1..=N`, and `NULL` marks a record that is not in the list. Every
//! operation takes the record and a list name (`""` is the default list),
//! binds the list's definition to the record's current values, and reads or
//! shifts rows through the [`RecordStore`].
//!
//! Operations are grouped by concern:
//!
//! - `queries`: positional reads (`first_item`, `higher_items`, ...)
//! - `mutations`: list maintenance (`insert_at`, `move_up`, ...)
//! - `lifecycle`: create/save/destroy/reload, including re-scoping records
//!   whose scope keys changed since they were loaded
//!
//! ```
//! use std::sync::Arc;
//! use sortable::{Lists, Record, registry::{ListDefinition, ListRegistry}, store::InMemoryStore};
//!
//! let mut registry = ListRegistry::new();
//! registry.register("todos", ListDefinition::new("").scope("project_id")).unwrap();
//! let lists = Lists::new(Arc::new(registry), Arc::new(InMemoryStore::new()));
//!
//! let mut a = Record::new("todos").with("project_id", 1);
//! let mut b = Record::new("todos").with("project_id", 1);
//! lists.save(&mut a).unwrap();
//! lists.save(&mut b).unwrap();
//!
//! assert!(lists.move_up(&mut b, "").unwrap());
//! lists.reload(&mut a).unwrap();
//! assert_eq!(a.get_int("position"), Some(2));
//! assert_eq!(b.get_int("position"), Some(1));
//! ```

mod lifecycle;
mod mutations;
mod queries;


use std::fmt;
use std::sync::Arc;

use crate::{
    Result,
    condition::ResolvedFilter,
    record::Record,
    registry::{ListDefinition, ListRegistry},
    store::RecordStore,
};

/// Handle to the ordering engine: a registry plus the store it operates on.
///
/// Cheap to clone; clones share the registry and the store.
#[derive(Clone)]
pub struct Lists {
    registry: Arc<ListRegistry>,
    store: Arc<dyn RecordStore>,
}

impl fmt::Debug for Lists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lists")
            .field("registry", &self.registry)
            .field("store", &"<RecordStore>")
            .finish()
    }
}

impl Lists {
    pub fn new(registry: Arc<ListRegistry>, store: Arc<dyn RecordStore>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &ListRegistry {
        &self.registry
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Look up `list` on `record`'s table and bind it to the record.
    ///
    /// Fails with `UnknownList` before anything touches the store.
    fn resolve(&self, record: &Record, list: &str) -> Result<(&ListDefinition, ResolvedFilter)> {
        let definition = self.registry.resolve(record.table(), list)?;
        let filter = definition.bind(record);
        tracing::trace!(
            table = record.table(),
            list,
            clauses = ?filter.clauses(),
            "Resolved list filter"
        );
        Ok((definition, filter))
    }

    /// Run `operation` inside a store transaction.
    ///
    /// Commits on success. On error the transaction is rolled back and the
    /// original error returned; the in-memory record keeps whatever values
    /// the operation had already written to it.
    fn transaction<T>(&self, name: &'static str, operation: impl FnOnce() -> Result<T>) -> Result<T> {
        self.store.begin()?;
        match operation() {
            Ok(value) => {
                self.store.commit()?;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(operation = name, error = %err, "Rolling back failed list operation");
                if let Err(rollback_err) = self.store.rollback() {
                    tracing::warn!(operation = name, error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// The record's value in `definition`'s order column.
fn order_of(definition: &ListDefinition, record: &Record) -> Option<i64> {
    record.get_int(definition.order_column())
}
