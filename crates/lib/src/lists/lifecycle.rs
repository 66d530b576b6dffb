//! Record lifecycle: create, save, destroy and reload.
//!
//! These keep lists consistent around plain persistence. A created record
//! joins the end of every list of its table; a destroyed record leaves a gap
//! that is closed in every list it was in; a saved record whose scope keys
//! changed moves from the end of its old scope's lists to the end of its new
//! scope's lists.

use super::{Lists, order_of};
use crate::{
    Result,
    record::Record,
    registry::ListDefinition,
    store::StoreError,
    value::Value,
};

impl Lists {
    /// Assign `field` on `record`, tracking scope-key changes.
    pub fn set(&self, record: &mut Record, field: &str, value: impl Into<Value>) {
        record.set(field, value, self.registry.as_ref());
    }

    /// Insert a new record at the end of every list of its table.
    ///
    /// A record that is already stored is saved instead.
    pub fn create(&self, record: &mut Record) -> Result<()> {
        if !record.is_new() {
            return self.save(record);
        }
        let table = record.table().to_string();
        self.transaction("create", || {
            for definition in self.registry.lists(&table) {
                self.append(record, definition)?;
            }
            let id = self.store.insert(record)?;
            record.mark_persisted(id);
            tracing::debug!(table = %table, id, "Created record");
            Ok(())
        })
    }

    /// Persist `record`, creating it if it is new.
    ///
    /// If scope keys changed since the record was loaded, the record is
    /// first taken out of every list scoped by a changed key (in its old
    /// scope) and appended to the same lists in its new scope.
    pub fn save(&self, record: &mut Record) -> Result<()> {
        let Some(id) = record.id() else {
            return self.create(record);
        };
        self.transaction("save", || {
            if record.scope_changed() {
                self.rescope(record)?;
            }
            self.store.update(record)?;
            record.mark_persisted(id);
            Ok(())
        })
    }

    /// Delete `record` and close its gap in every list it was in.
    ///
    /// Gaps are closed in the scope the record was stored in. Afterwards the
    /// record has no id and no positions.
    pub fn destroy(&self, record: &mut Record) -> Result<()> {
        let stored = record.stored_copy().ok_or_else(|| StoreError::NotPersisted {
            table: record.table().to_string(),
        })?;
        self.transaction("destroy", || {
            self.store.delete(record)?;
            let table = record.table().to_string();
            for definition in self.registry.lists(&table) {
                self.close_gap(&mut stored.clone(), definition)?;
                record.write(definition.order_column(), Value::Null);
            }
            tracing::debug!(table = record.table(), id = ?record.id(), "Destroyed record");
            record.mark_destroyed();
            Ok(())
        })
    }

    /// Replace `record`'s fields with the stored row and clear its ledger.
    pub fn reload(&self, record: &mut Record) -> Result<()> {
        let id = record.id().ok_or_else(|| StoreError::NotPersisted {
            table: record.table().to_string(),
        })?;
        let loaded = self.store.fetch(record.table(), id)?;
        record.replace_with(loaded);
        Ok(())
    }

    /// Move `record` between scopes for every list scoped by a changed key.
    fn rescope(&self, record: &mut Record) -> Result<()> {
        let changed: Vec<(String, Value)> = record
            .scope_changes()
            .map(|key| (key.to_string(), record.get(key).clone()))
            .collect();
        let affected: Vec<&ListDefinition> = self
            .registry
            .lists(record.table())
            .filter(|definition| changed.iter().any(|(key, _)| definition.is_scoped_by(key)))
            .collect();

        tracing::debug!(
            table = record.table(),
            id = ?record.id(),
            keys = ?changed.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>(),
            lists = affected.len(),
            "Moving record to a new scope"
        );

        for (key, _) in &changed {
            let old = record.persisted_value(key).clone();
            record.write(key, old);
        }
        for definition in &affected {
            if order_of(definition, record).is_some() {
                self.close_gap(record, definition)?;
            }
        }
        for (key, new) in changed {
            record.write(&key, new);
        }
        for definition in &affected {
            self.append(record, definition)?;
        }
        Ok(())
    }
}
