//! Records: rows of a table plus the state needed to keep lists consistent.
//!
//! A [`Record`] carries its current field values, a snapshot of the values
//! as they were last loaded from or written to the store, and the
//! scope-change ledger. The snapshot is what the engine uses as the
//! "previously persisted value" of a scope key when a record moves between
//! scopes.

use std::collections::{BTreeMap, BTreeSet};

use crate::value::Value;

static NULL: Value = Value::Null;

/// Capability invoked before a field assignment is committed.
///
/// Implemented by [`ListRegistry`](crate::registry::ListRegistry), which knows
/// which fields act as scope keys for which tables.
pub trait ScopeTracker {
    /// Whether `field` is a scope key of any list registered on `table`.
    fn tracks_scope(&self, table: &str, field: &str) -> bool;

    /// Record a pending scope change on `record` before `field` becomes `new_value`.
    ///
    /// New records are never tracked: they join their lists on create.
    /// Assigning the persisted value back removes the key from the ledger.
    fn track_scope_change(&self, record: &mut Record, field: &str, new_value: &Value) {
        if record.is_new() || !self.tracks_scope(record.table(), field) {
            return;
        }
        if record.persisted_value(field) == new_value {
            record.scope_changes.remove(field);
        } else {
            record.scope_changes.insert(field.to_string());
        }
    }
}

/// One row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    table: String,
    id: Option<i64>,
    fields: BTreeMap<String, Value>,
    persisted: BTreeMap<String, Value>,
    scope_changes: BTreeSet<String>,
}

impl Record {
    /// A new, unsaved record of `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            id: None,
            fields: BTreeMap::new(),
            persisted: BTreeMap::new(),
            scope_changes: BTreeSet::new(),
        }
    }

    /// Builder-style field initialisation for new records.
    ///
    /// Not tracked: use [`Record::set`] on persisted records.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// A record as loaded from the store. The snapshot equals the fields.
    pub fn loaded(table: impl Into<String>, id: i64, fields: BTreeMap<String, Value>) -> Self {
        Self {
            table: table.into(),
            id: Some(id),
            persisted: fields.clone(),
            fields,
            scope_changes: BTreeSet::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Whether this record has not been stored yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Current value of `field`; `Null` if unset.
    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Current integer value of `field`, if it holds one.
    pub fn get_int(&self, field: &str) -> Option<i64> {
        self.get(field).as_int()
    }

    /// Value of `field` as last loaded or persisted.
    pub fn persisted_value(&self, field: &str) -> &Value {
        self.persisted.get(field).unwrap_or(&NULL)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Fields whose current value differs from the persisted snapshot.
    pub fn changed_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(field, value)| self.persisted.get(field.as_str()) != Some(*value))
            .map(|(field, value)| (field.as_str(), value))
    }

    /// Assign `field`, letting `tracker` note a scope change first.
    pub fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
        tracker: &dyn ScopeTracker,
    ) {
        let field = field.into();
        let value = value.into();
        tracker.track_scope_change(self, &field, &value);
        self.fields.insert(field, value);
    }

    /// Scope keys changed since the record was loaded or last persisted.
    pub fn scope_changes(&self) -> impl Iterator<Item = &str> {
        self.scope_changes.iter().map(String::as_str)
    }

    /// Whether any scope key has a pending change.
    pub fn scope_changed(&self) -> bool {
        !self.scope_changes.is_empty()
    }

    /// Whether both records are the same stored row.
    pub fn same_row(&self, other: &Record) -> bool {
        self.id.is_some() && self.id == other.id && self.table == other.table
    }

    /// Untracked assignment used by the engine for order and scope rewrites.
    pub(crate) fn write(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    /// Mark the current fields as persisted under `id` and clear the ledger.
    pub(crate) fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
        self.persisted = self.fields.clone();
        self.scope_changes.clear();
    }

    /// Take the current value of `field` into the persisted snapshot.
    pub(crate) fn mark_field_persisted(&mut self, field: &str) {
        let value = self.get(field).clone();
        self.persisted.insert(field.to_string(), value);
    }

    /// The row as last persisted, if the record is stored.
    pub(crate) fn stored_copy(&self) -> Option<Record> {
        self.id
            .map(|id| Record::loaded(self.table.clone(), id, self.persisted.clone()))
    }

    /// Replace all state with a freshly loaded copy of the row.
    pub(crate) fn replace_with(&mut self, loaded: Record) {
        *self = loaded;
    }

    /// Forget the stored row after a delete.
    pub(crate) fn mark_destroyed(&mut self) {
        self.id = None;
        self.persisted.clear();
        self.scope_changes.clear();
    }
}
