//! List maintenance: appending, removing, inserting and moving items.
//!
//! Renumbering is always a single bulk shift of the order column over the
//! bound filter, so an operation touches each affected row once.

use super::{Lists, order_of};
use crate::{
    Result,
    condition::Clause,
    record::Record,
    registry::ListDefinition,
    value::Value,
};

impl Lists {
    /// Put `record` at the end of `list` without saving it.
    pub fn add_to_list(&self, record: &mut Record, list: &str) -> Result<()> {
        let definition = self.registry.resolve(record.table(), list)?;
        self.append(record, definition)
    }

    /// Move `record` to the end of `list` and save it.
    pub fn add_to_list_and_save(&self, record: &mut Record, list: &str) -> Result<()> {
        let definition = self.registry.resolve(record.table(), list)?;
        self.transaction("add_to_list_and_save", || {
            self.settle_scope(record)?;
            if self.in_list(record, list)? {
                self.detach(record, definition)?;
            }
            self.append(record, definition)?;
            self.save(record)
        })
    }

    /// Take `record` out of `list`, close the gap and save it.
    ///
    /// Returns `false` if the record is not in the list.
    pub fn remove_from_list_and_save(&self, record: &mut Record, list: &str) -> Result<bool> {
        let definition = self.registry.resolve(record.table(), list)?;
        self.transaction("remove_from_list_and_save", || {
            self.settle_scope(record)?;
            if !self.in_list(record, list)? {
                return Ok(false);
            }
            self.close_gap(record, definition)?;
            self.save(record)?;
            Ok(true)
        })
    }

    /// Place `record` at `position` in `list`, shifting later items down.
    ///
    /// Positions past the end append. A new record is saved first, which
    /// puts it in every list of its table. Returns `false` for positions
    /// below 1.
    pub fn insert_at(&self, record: &mut Record, position: i64, list: &str) -> Result<bool> {
        let definition = self.registry.resolve(record.table(), list)?;
        if position < 1 {
            return Ok(false);
        }
        self.transaction("insert_at", || {
            if record.is_new() {
                self.save(record)?;
            }
            self.settle_scope(record)?;
            if self.in_list(record, list)? {
                self.detach(record, definition)?;
            }

            if position > self.last_position(record, list)? {
                self.append(record, definition)?;
            } else {
                let column = definition.order_column();
                let filter = definition
                    .bind(record)
                    .and(Clause::greater_than(column, position - 1));
                let shifted = self.store.update_all_where(&filter, column, 1)?;
                record.write(column, Value::Int(position));
                tracing::debug!(
                    table = record.table(),
                    list,
                    id = ?record.id(),
                    position,
                    shifted,
                    "Inserted item"
                );
            }
            self.save(record)?;
            Ok(true)
        })
    }

    /// Swap `record` with the item above it.
    pub fn move_up(&self, record: &mut Record, list: &str) -> Result<bool> {
        let definition = self.registry.resolve(record.table(), list)?;
        self.transaction("move_up", || {
            self.settle_scope(record)?;
            let Some(order) = self.movable_order(record, definition, list)? else {
                return Ok(false);
            };
            if self.is_first_item(record, list)? {
                return Ok(false);
            }
            self.insert_at(record, order - 1, list)
        })
    }

    /// Swap `record` with the item below it.
    pub fn move_down(&self, record: &mut Record, list: &str) -> Result<bool> {
        let definition = self.registry.resolve(record.table(), list)?;
        self.transaction("move_down", || {
            self.settle_scope(record)?;
            let Some(order) = self.movable_order(record, definition, list)? else {
                return Ok(false);
            };
            if self.is_last_item(record, list)? {
                return Ok(false);
            }
            self.insert_at(record, order + 1, list)
        })
    }

    pub fn move_to_top(&self, record: &mut Record, list: &str) -> Result<bool> {
        let definition = self.registry.resolve(record.table(), list)?;
        self.transaction("move_to_top", || {
            self.settle_scope(record)?;
            if self.movable_order(record, definition, list)?.is_none()
                || self.is_first_item(record, list)?
            {
                return Ok(false);
            }
            self.insert_at(record, 1, list)
        })
    }

    pub fn move_to_bottom(&self, record: &mut Record, list: &str) -> Result<bool> {
        let definition = self.registry.resolve(record.table(), list)?;
        self.transaction("move_to_bottom", || {
            self.settle_scope(record)?;
            if self.movable_order(record, definition, list)?.is_none()
                || self.is_last_item(record, list)?
            {
                return Ok(false);
            }
            self.add_to_list_and_save(record, list)?;
            Ok(true)
        })
    }

    /// Save a pending scope-key change of a stored record, which moves it
    /// into its new scope before a list operation reads or shifts rows.
    fn settle_scope(&self, record: &mut Record) -> Result<()> {
        if record.is_new() || !record.scope_changed() {
            return Ok(());
        }
        tracing::debug!(
            table = record.table(),
            id = ?record.id(),
            "Saving pending scope change before list operation"
        );
        self.save(record)
    }

    /// The record's position, if it is in `list`.
    fn movable_order(
        &self,
        record: &Record,
        definition: &ListDefinition,
        list: &str,
    ) -> Result<Option<i64>> {
        if !self.in_list(record, list)? {
            return Ok(None);
        }
        Ok(order_of(definition, record))
    }

    /// Set the order column to one past the current last position.
    pub(super) fn append(&self, record: &mut Record, definition: &ListDefinition) -> Result<()> {
        let position = self.last_position(record, definition.name())? + 1;
        record.write(definition.order_column(), Value::Int(position));
        tracing::debug!(
            table = record.table(),
            list = definition.name(),
            id = ?record.id(),
            position,
            "Appended item"
        );
        Ok(())
    }

    /// Shift every item below `record` up by one and clear its position.
    ///
    /// Only the in-memory record loses its position; the stored row keeps
    /// the old value until the record is written.
    pub(super) fn close_gap(&self, record: &mut Record, definition: &ListDefinition) -> Result<()> {
        let column = definition.order_column();
        let Some(order) = order_of(definition, record) else {
            return Ok(());
        };
        let filter = definition
            .bind(record)
            .and(Clause::greater_than(column, order));
        let shifted = self.store.update_all_where(&filter, column, -1)?;
        record.write(column, Value::Null);
        tracing::debug!(
            table = record.table(),
            list = definition.name(),
            id = ?record.id(),
            position = order,
            shifted,
            "Removed item"
        );
        Ok(())
    }

    /// [`Lists::close_gap`], then write the cleared position so the stored
    /// row no longer counts towards `last_position`.
    ///
    /// Only the order column is written; other pending edits wait for the
    /// next save.
    fn detach(&self, record: &mut Record, definition: &ListDefinition) -> Result<()> {
        let column = definition.order_column();
        let Some(mut cleared) = record.stored_copy() else {
            return self.close_gap(record, definition);
        };
        self.close_gap(record, definition)?;
        cleared.write(column, Value::Null);
        self.store.update(&cleared)?;
        record.mark_field_persisted(column);
        Ok(())
    }
}
