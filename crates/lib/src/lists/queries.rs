//! Positional reads.

use super::{Lists, order_of};
use crate::{Result, condition::Clause, record::Record};

impl Lists {
    /// Whether `record` is stored and holds a position in `list`.
    pub fn in_list(&self, record: &Record, list: &str) -> Result<bool> {
        let definition = self.registry.resolve(record.table(), list)?;
        Ok(!record.is_new() && order_of(definition, record).is_some())
    }

    /// The item at position 1 of `record`'s scope.
    pub fn first_item(&self, record: &Record, list: &str) -> Result<Option<Record>> {
        let (definition, filter) = self.resolve(record, list)?;
        self.store
            .find_one_where(&filter, definition.order_column(), 1)
    }

    /// The item with the highest position in `record`'s scope.
    pub fn last_item(&self, record: &Record, list: &str) -> Result<Option<Record>> {
        let (definition, filter) = self.resolve(record, list)?;
        let column = definition.order_column();
        let filter = filter.and(Clause::not_null(column));
        match self.store.max_where(&filter, column)? {
            Some(last) => self.store.find_one_where(&filter, column, last),
            None => Ok(None),
        }
    }

    pub fn is_first_item(&self, record: &Record, list: &str) -> Result<bool> {
        Ok(self
            .first_item(record, list)?
            .is_some_and(|first| first.same_row(record)))
    }

    pub fn is_last_item(&self, record: &Record, list: &str) -> Result<bool> {
        Ok(self
            .last_item(record, list)?
            .is_some_and(|last| last.same_row(record)))
    }

    /// Highest position in `record`'s scope, or 0 for an empty list.
    pub fn last_position(&self, record: &Record, list: &str) -> Result<i64> {
        let (definition, filter) = self.resolve(record, list)?;
        let column = definition.order_column();
        Ok(self
            .store
            .max_where(&filter.and(Clause::not_null(column)), column)?
            .unwrap_or(0))
    }

    /// Items above `record`, ascending by position.
    pub fn higher_items(&self, record: &Record, list: &str) -> Result<Vec<Record>> {
        let (definition, filter) = self.resolve(record, list)?;
        let column = definition.order_column();
        let Some(order) = order_of(definition, record) else {
            return Ok(Vec::new());
        };
        self.store
            .find_all_where(&filter.and(Clause::less_than(column, order)), column)
    }

    /// Items below `record`, ascending by position.
    pub fn lower_items(&self, record: &Record, list: &str) -> Result<Vec<Record>> {
        let (definition, filter) = self.resolve(record, list)?;
        let column = definition.order_column();
        let Some(order) = order_of(definition, record) else {
            return Ok(Vec::new());
        };
        self.store
            .find_all_where(&filter.and(Clause::greater_than(column, order)), column)
    }

    /// Every item in `record`'s scope, ascending by position.
    ///
    /// Records outside the list (`NULL` position) are not included.
    pub fn items(&self, record: &Record, list: &str) -> Result<Vec<Record>> {
        let (definition, filter) = self.resolve(record, list)?;
        let column = definition.order_column();
        self.store
            .find_all_where(&filter.and(Clause::not_null(column)), column)
    }

    /// The item `offset` positions away from `record`.
    pub fn item_at_offset(&self, record: &Record, offset: i64, list: &str) -> Result<Option<Record>> {
        let (definition, filter) = self.resolve(record, list)?;
        let Some(order) = order_of(definition, record).filter(|_| !record.is_new()) else {
            return Ok(None);
        };
        self.store
            .find_one_where(&filter, definition.order_column(), order + offset)
    }

    pub fn next_item(&self, record: &Record, list: &str) -> Result<Option<Record>> {
        self.item_at_offset(record, 1, list)
    }

    pub fn previous_item(&self, record: &Record, list: &str) -> Result<Option<Record>> {
        self.item_at_offset(record, -1, list)
    }
}
