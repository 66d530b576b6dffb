//! In-memory record store implementation
//!
//! This module provides an in-memory implementation of the [`RecordStore`]
//! trait, suitable for testing, development, or small embedded lists whose
//! persistence is handled by saving the whole state to a JSON file.

mod persistence;

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use super::{RecordStore, StoreError, gate::TransactionGate};
use crate::{Result, condition::ResolvedFilter, record::Record, value::Value};

/// Fields of one stored row, keyed by column name.
pub(crate) type Row = BTreeMap<String, Value>;

/// One table: rows keyed by id plus the id sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Table {
    pub(crate) last_id: i64,
    pub(crate) rows: BTreeMap<i64, Row>,
}

/// A simple in-memory record store using a `HashMap` of tables.
///
/// Tables are created on first insert; reading an unknown table yields no
/// rows. Ids are assigned per table from a monotonically increasing sequence
/// and never reused.
///
/// Transactions snapshot every table when the outermost `begin` runs and
/// restore that snapshot on `rollback`. While one thread has a transaction
/// open, calls from other threads block until it commits or rolls back.
///
/// It provides basic persistence via [`InMemoryStore::save_to_file`] and
/// [`InMemoryStore::load_from_file`], serializing the tables to JSON.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Tables with read-write lock for concurrent access
    pub(crate) tables: RwLock<HashMap<String, Table>>,
    /// Owner of the open transaction and the snapshot to roll back to
    transaction: TransactionGate<HashMap<String, Table>>,
}

impl InMemoryStore {
    /// Creates a new, empty `InMemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored in `table`.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        Ok(self.read()?.get(table).map_or(0, |t| t.rows.len()))
    }

    /// Saves every table to a specified file as JSON.
    ///
    /// # Arguments
    /// * `path` - The path to the file where the state should be saved.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let _turn = self.transaction.enter()?;
        persistence::save_to_file(self, path)
    }

    /// Loads the store state from a specified JSON file.
    ///
    /// If the file does not exist, a new, empty store is returned.
    ///
    /// # Arguments
    /// * `path` - The path to the file from which to load the state.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path)
    }

    pub(crate) fn from_tables(tables: HashMap<String, Table>) -> Self {
        Self {
            tables: RwLock::new(tables),
            transaction: TransactionGate::default(),
        }
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Table>>> {
        self.tables
            .read()
            .map_err(|_| StoreError::LockPoisoned.into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Table>>> {
        self.tables
            .write()
            .map_err(|_| StoreError::LockPoisoned.into())
    }

    /// Rows of `filter`'s table that satisfy it, in id order.
    fn matching<'a>(
        tables: &'a HashMap<String, Table>,
        filter: &'a ResolvedFilter,
    ) -> impl Iterator<Item = (&'a i64, &'a Row)> + 'a {
        tables
            .get(filter.table())
            .into_iter()
            .flat_map(|table| table.rows.iter())
            .filter(move |(_, row)| filter.matches(row))
    }

    fn stored_id(record: &Record) -> Result<i64> {
        record.id().ok_or_else(|| {
            StoreError::NotPersisted {
                table: record.table().to_string(),
            }
            .into()
        })
    }
}

impl RecordStore for InMemoryStore {
    fn find_one_where(
        &self,
        filter: &ResolvedFilter,
        column: &str,
        value: i64,
    ) -> Result<Option<Record>> {
        let _turn = self.transaction.enter()?;
        let tables = self.read()?;
        let found = Self::matching(&tables, filter)
            .find(|(_, row)| row.get(column).and_then(Value::as_int) == Some(value))
            .map(|(id, row)| Record::loaded(filter.table(), *id, row.clone()));
        Ok(found)
    }

    fn find_all_where(&self, filter: &ResolvedFilter, order_by: &str) -> Result<Vec<Record>> {
        let _turn = self.transaction.enter()?;
        let tables = self.read()?;
        let mut records: Vec<Record> = Self::matching(&tables, filter)
            .map(|(id, row)| Record::loaded(filter.table(), *id, row.clone()))
            .collect();
        // NULLs sort first, as in SQLite.
        records.sort_by_key(|record| record.get_int(order_by));
        Ok(records)
    }

    fn max_where(&self, filter: &ResolvedFilter, column: &str) -> Result<Option<i64>> {
        let _turn = self.transaction.enter()?;
        let tables = self.read()?;
        Ok(Self::matching(&tables, filter)
            .filter_map(|(_, row)| row.get(column).and_then(Value::as_int))
            .max())
    }

    fn update_all_where(&self, filter: &ResolvedFilter, column: &str, delta: i64) -> Result<u64> {
        let _turn = self.transaction.enter()?;
        let mut tables = self.write()?;
        let Some(table) = tables.get_mut(filter.table()) else {
            return Ok(0);
        };

        let mut changed = 0;
        for row in table.rows.values_mut() {
            if !filter.matches(row) {
                continue;
            }
            if let Some(Value::Int(current)) = row.get_mut(column) {
                *current += delta;
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn insert(&self, record: &Record) -> Result<i64> {
        let _turn = self.transaction.enter()?;
        let mut tables = self.write()?;
        let table = tables.entry(record.table().to_string()).or_default();
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, record.fields().clone());
        Ok(id)
    }

    fn update(&self, record: &Record) -> Result<()> {
        let id = Self::stored_id(record)?;
        let _turn = self.transaction.enter()?;
        let mut tables = self.write()?;
        let row = tables
            .get_mut(record.table())
            .and_then(|table| table.rows.get_mut(&id))
            .ok_or_else(|| StoreError::RecordNotFound {
                table: record.table().to_string(),
                id,
            })?;
        for (field, value) in record.changed_fields() {
            row.insert(field.to_string(), value.clone());
        }
        Ok(())
    }

    fn delete(&self, record: &Record) -> Result<()> {
        let id = Self::stored_id(record)?;
        let _turn = self.transaction.enter()?;
        let mut tables = self.write()?;
        tables
            .get_mut(record.table())
            .and_then(|table| table.rows.remove(&id))
            .map(|_| ())
            .ok_or_else(|| {
                StoreError::RecordNotFound {
                    table: record.table().to_string(),
                    id,
                }
                .into()
            })
    }

    fn fetch(&self, table: &str, id: i64) -> Result<Record> {
        let _turn = self.transaction.enter()?;
        let tables = self.read()?;
        tables
            .get(table)
            .and_then(|t| t.rows.get(&id))
            .map(|row| Record::loaded(table, id, row.clone()))
            .ok_or_else(|| {
                StoreError::RecordNotFound {
                    table: table.to_string(),
                    id,
                }
                .into()
            })
    }

    fn begin(&self) -> Result<()> {
        let mut turn = self.transaction.enter()?;
        if !turn.nest() {
            let snapshot = self.read()?.clone();
            turn.open(snapshot);
        }
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        self.transaction.enter()?.commit()?;
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        let mut turn = self.transaction.enter()?;
        if let Some(snapshot) = turn.rollback() {
            *self.write()? = snapshot;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
